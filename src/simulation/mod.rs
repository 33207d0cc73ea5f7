//! Simulation runtime: three concurrent loops over one shared roster
//!
//! Movement mutates positions and enqueues combat tasks, the combat loop
//! drains and resolves them, and the report loop renders periodic status
//! snapshots. All three run until a cooperative stop flag is raised.

pub mod report;
pub mod runtime;
pub mod spawn;

pub use runtime::{resolve_task, CombatTask, RunState, Simulation, StopHandle};
