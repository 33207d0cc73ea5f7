//! Append-only roster of NPCs for one simulation run
//!
//! NPCs are inserted once at setup and never removed; death flips the
//! liveness flag in place, so indices and iteration order stay stable for
//! the lifetime of the run. Queue entries and notification payloads refer
//! back into the roster by index.

use crate::core::error::{Result, SimError};
use crate::entity::Npc;

#[derive(Debug, Default)]
pub struct Roster {
    npcs: Vec<Npc>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an NPC, returning its stable index.
    ///
    /// Names are unique within a roster; a duplicate is rejected.
    pub fn insert(&mut self, npc: Npc) -> Result<usize> {
        if self.npcs.iter().any(|n| n.name() == npc.name()) {
            return Err(SimError::DuplicateName(npc.name().to_string()));
        }
        self.npcs.push(npc);
        Ok(self.npcs.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Npc> {
        self.npcs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Npc> {
        self.npcs.get_mut(index)
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.npcs.iter().position(|n| n.name() == name)
    }

    pub fn as_slice(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn as_mut_slice(&mut self) -> &mut [Npc] {
        &mut self.npcs
    }

    pub fn iter_living(&self) -> impl Iterator<Item = (usize, &Npc)> {
        self.npcs
            .iter()
            .enumerate()
            .filter(|(_, npc)| npc.is_alive())
    }

    pub fn living_count(&self) -> usize {
        self.npcs.iter().filter(|npc| npc.is_alive()).count()
    }
}
