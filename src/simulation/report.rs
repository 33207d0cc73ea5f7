//! Textual status snapshot of the roster
//!
//! A periodic map dump, not an interactive view: living NPCs are plotted by
//! kind symbol on a downsampled character grid with a living-count summary.

use std::time::Duration;

use crate::core::config::SimulationConfig;
use crate::entity::Roster;

/// Render the map grid plus a living-count header.
///
/// Never mutates state; callers hold the roster read lock for the duration
/// of the pass.
pub fn render_map(roster: &Roster, config: &SimulationConfig, elapsed: Duration) -> String {
    let size = (config.map_size as usize).max(1);
    let mut grid = vec![vec!['.'; size]; size];

    let mut alive = 0;
    for (_, npc) in roster.iter_living() {
        let x = (npc.pos().x as usize).min(size - 1);
        let y = (npc.pos().y as usize).min(size - 1);
        grid[y][x] = npc.kind().symbol();
        alive += 1;
    }

    let mut out = String::new();
    out.push_str(&format!("=== Map at {}s ===\n", elapsed.as_secs()));
    out.push_str(&format!("Alive: {} / {}\n", alive, roster.len()));

    // every second cell keeps the dump terminal-sized
    for y in (0..size).step_by(2) {
        out.push_str(&format!("{y:>3} "));
        for x in (0..size).step_by(2) {
            out.push(grid[y][x]);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Npc, NpcKind};

    #[test]
    fn test_render_plots_living_by_symbol() {
        let config = SimulationConfig::default();
        let mut roster = Roster::new();
        roster
            .insert(Npc::new(NpcKind::Knight, "Arthur", 10.0, 10.0, config.map_size).unwrap())
            .unwrap();
        roster
            .insert(Npc::new(NpcKind::Bear, "Mishka", 20.0, 20.0, config.map_size).unwrap())
            .unwrap();

        let out = render_map(&roster, &config, Duration::from_secs(5));
        assert!(out.starts_with("=== Map at 5s ===\n"));
        assert!(out.contains("Alive: 2 / 2"));
        assert!(out.contains('K'));
        assert!(out.contains('B'));
    }

    #[test]
    fn test_render_skips_dead() {
        let config = SimulationConfig::default();
        let mut roster = Roster::new();
        let idx = roster
            .insert(Npc::new(NpcKind::Orc, "Grom", 50.0, 50.0, config.map_size).unwrap())
            .unwrap();
        roster.get_mut(idx).unwrap().kill();

        let out = render_map(&roster, &config, Duration::ZERO);
        assert!(out.contains("Alive: 0 / 1"));
        assert!(!out.contains('O'));
    }
}
