//! Non-concurrent roster editor with text persistence
//!
//! The editor owns its own NPC list (unlike the run-time roster it supports
//! removal), saves and loads one NPC per line as `<Kind> <Name> <X> <Y>`,
//! and can run a one-shot melee pass over every living pair in range. Kills
//! here follow the kind matchup directly, with no confirmation rolls.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::combat::{eligibility, Verdict};
use crate::core::error::{Result, SimError};
use crate::entity::Npc;
use crate::observer::{CombatEvent, ObserverRegistry};

pub struct RosterEditor {
    npcs: Vec<Npc>,
    bound: f64,
}

impl RosterEditor {
    pub fn new(bound: f64) -> Self {
        Self { npcs: Vec::new(), bound }
    }

    /// Add an NPC; names must be unique within the editor.
    pub fn add(&mut self, npc: Npc) -> Result<()> {
        if self.npcs.iter().any(|n| n.name() == npc.name()) {
            return Err(SimError::DuplicateName(npc.name().to_string()));
        }
        self.npcs.push(npc);
        Ok(())
    }

    /// Remove by name; returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.npcs.len();
        self.npcs.retain(|n| n.name() != name);
        self.npcs.len() < before
    }

    pub fn find(&self, name: &str) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.name() == name)
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    /// Formatted listing of the living NPCs
    pub fn listing(&self) -> String {
        if self.npcs.is_empty() {
            return "No NPCs in the editor.\n".to_string();
        }
        let mut out = String::from("NPCs in the editor:\n");
        for npc in self.npcs.iter().filter(|n| n.is_alive()) {
            let _ = writeln!(
                out,
                "  {} \"{}\" at ({}, {})",
                npc.kind(),
                npc.name(),
                npc.pos().x,
                npc.pos().y
            );
        }
        out
    }

    /// Save the living NPCs, one `<Kind> <Name> <X> <Y>` line each.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        for npc in self.npcs.iter().filter(|n| n.is_alive()) {
            let _ = writeln!(
                out,
                "{} {} {} {}",
                npc.kind(),
                npc.name(),
                npc.pos().x,
                npc.pos().y
            );
        }
        fs::write(path, out)?;
        Ok(())
    }

    /// Load a roster file written by `save`.
    ///
    /// Blank lines are skipped; a line that does not parse as
    /// `<Kind> <Name> <X> <Y>` fails the whole load.
    pub fn load(path: &Path, bound: f64) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut editor = Self::new(bound);

        for (number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let malformed = || SimError::MalformedLine {
                line: number + 1,
                text: line.to_string(),
            };

            let mut fields = line.split_whitespace();
            let kind = fields.next().ok_or_else(malformed)?;
            let name = fields.next().ok_or_else(malformed)?;
            let x: f64 = fields.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
            let y: f64 = fields.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
            if fields.next().is_some() {
                return Err(malformed());
            }

            editor.add(Npc::from_kind_str(kind, name, x, y, bound)?)?;
        }

        Ok(editor)
    }

    /// One-shot melee: every living ordered pair within `range` fights once,
    /// kills applied by the kind matchup alone, outcomes fanned out to the
    /// registry.
    pub fn run_melee(&mut self, range: f64, observers: &ObserverRegistry) {
        for i in 0..self.npcs.len() {
            if !self.npcs[i].is_alive() {
                continue;
            }
            for j in i + 1..self.npcs.len() {
                if !self.npcs[j].is_alive() {
                    continue;
                }
                if self.npcs[i].distance_to(&self.npcs[j]) > range {
                    continue;
                }

                let elig = eligibility(self.npcs[i].kind(), self.npcs[j].kind());
                let verdict = Verdict {
                    defender_died: elig.defender,
                    attacker_died: elig.attacker,
                };
                if !verdict.any() {
                    continue;
                }

                let event = CombatEvent::new(&self.npcs[i], &self.npcs[j], verdict);
                if verdict.defender_died {
                    self.npcs[j].kill();
                }
                if verdict.attacker_died {
                    self.npcs[i].kill();
                }
                observers.notify(&event);

                if !self.npcs[i].is_alive() {
                    break;
                }
            }
        }
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NpcKind;

    fn npc(kind: NpcKind, name: &str, x: f64, y: f64) -> Npc {
        Npc::new(kind, name, x, y, 100.0).unwrap()
    }

    #[test]
    fn test_add_and_remove() {
        let mut editor = RosterEditor::new(100.0);
        editor.add(npc(NpcKind::Orc, "Grom", 10.0, 10.0)).unwrap();
        assert!(editor.add(npc(NpcKind::Bear, "Grom", 20.0, 20.0)).is_err());
        assert_eq!(editor.len(), 1);

        assert!(editor.remove("Grom"));
        assert!(!editor.remove("Grom"));
        assert!(editor.is_empty());
    }

    #[test]
    fn test_melee_kills_by_matchup() {
        let mut editor = RosterEditor::new(100.0);
        editor.add(npc(NpcKind::Knight, "Arthur", 10.0, 10.0)).unwrap();
        editor.add(npc(NpcKind::Orc, "Grom", 12.0, 10.0)).unwrap();
        // out of range, untouched
        editor.add(npc(NpcKind::Bear, "Mishka", 90.0, 90.0)).unwrap();

        editor.run_melee(5.0, &ObserverRegistry::new());

        assert!(editor.find("Arthur").unwrap().is_alive());
        assert!(!editor.find("Grom").unwrap().is_alive());
        assert!(editor.find("Mishka").unwrap().is_alive());
    }

    #[test]
    fn test_listing_shows_living_only() {
        let mut editor = RosterEditor::new(100.0);
        editor.add(npc(NpcKind::Knight, "Arthur", 10.0, 10.0)).unwrap();
        editor.add(npc(NpcKind::Orc, "Grom", 11.0, 10.0)).unwrap();
        editor.run_melee(5.0, &ObserverRegistry::new());

        let listing = editor.listing();
        assert!(listing.contains("Arthur"));
        assert!(!listing.contains("Grom"));
    }
}
