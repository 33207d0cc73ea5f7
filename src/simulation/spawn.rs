//! Roster generation for a simulation run

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::entity::{Npc, NpcKind, Roster};

/// Populate a roster with `npc_count` NPCs of random kind and position.
///
/// Names follow `<Kind>_<n>` and are unique by construction. An NPC that
/// fails bounds validation is silently discarded and redrawn.
pub fn populate(roster: &mut Roster, config: &SimulationConfig, rng: &mut impl Rng) -> Result<()> {
    let mut spawned = 0;
    while spawned < config.npc_count {
        let kind = NpcKind::ALL[rng.gen_range(0..NpcKind::ALL.len())];
        let x = rng.gen_range(0.0..=config.map_size);
        let y = rng.gen_range(0.0..=config.map_size);
        let name = format!("{kind}_{spawned}");

        match Npc::new(kind, name, x, y, config.map_size) {
            Ok(npc) => {
                roster.insert(npc)?;
                spawned += 1;
            }
            // invalid spawn point, redraw
            Err(_) => continue,
        }
    }

    tracing::debug!("populated roster with {} NPCs", roster.len());
    Ok(())
}
