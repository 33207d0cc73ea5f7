//! Wildmarch - Fixed-Duration Concurrent Skirmish Simulation

pub mod combat;
pub mod core;
pub mod editor;
pub mod entity;
pub mod observer;
pub mod simulation;
