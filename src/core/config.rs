//! Simulation configuration with documented constants
//!
//! All tunable values are collected here with explanations of their purpose
//! and how they interact with each other.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one simulation run
///
/// The defaults reproduce the standard skirmish: 50 NPCs on a 100x100 map
/// for 30 seconds.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Side length of the square map (world units)
    ///
    /// One bound governs everything: NPC construction fails outside it,
    /// movement clamps to it, and the status grid renders it.
    pub map_size: f64,

    /// Number of NPCs generated at setup
    pub npc_count: usize,

    /// Wall-clock duration of the run
    ///
    /// When it elapses the stop flag is raised and all loops wind down
    /// cooperatively.
    pub run_duration: Duration,

    /// Polling period of the movement loop
    pub movement_period: Duration,

    /// Polling period of the combat loop
    pub combat_period: Duration,

    /// Polling period of the status-report loop
    pub report_period: Duration,

    /// Fraction of an NPC's movement radius covered per movement tick
    ///
    /// At the default (0.1), a Knight (radius 30) advances 3 units per tick.
    pub move_step_fraction: f64,

    /// Append-only kill log written by the file sink
    pub log_path: PathBuf,

    /// Optional seed for roster generation
    ///
    /// `None` draws from the OS entropy pool; tests pin this for
    /// reproducible spawns. Movement and confirmation rolls are always
    /// drawn from per-thread generators and are not affected.
    pub spawn_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            map_size: 100.0,
            npc_count: 50,
            run_duration: Duration::from_secs(30),
            movement_period: Duration::from_millis(100),
            combat_period: Duration::from_millis(50),
            report_period: Duration::from_secs(1),
            move_step_fraction: 0.1,
            log_path: PathBuf::from("log.txt"),
            spawn_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_periods_shorter_than_run() {
        let config = SimulationConfig::default();
        assert!(config.movement_period < config.run_duration);
        assert!(config.combat_period < config.movement_period);
        assert!(config.report_period < config.run_duration);
    }
}
