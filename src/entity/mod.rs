//! Entity model: NPC kinds, the NPC record, and the shared roster

pub mod npc;
pub mod roster;

pub use npc::{Npc, NpcKind};
pub use roster::Roster;
