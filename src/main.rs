//! Wildmarch - Entry Point
//!
//! Prints the run configuration, executes one fixed-duration simulation,
//! and reports the survivors.

use wildmarch::core::config::SimulationConfig;
use wildmarch::core::error::Result;
use wildmarch::simulation::Simulation;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("wildmarch=info")
        .init();

    let config = SimulationConfig::default();

    println!("Wildmarch");
    println!("Map size: {0}x{0}", config.map_size);
    println!("Run duration: {} seconds", config.run_duration.as_secs());
    println!("NPC count: {}", config.npc_count);
    println!("\nStarting simulation...");

    let npc_count = config.npc_count;
    let log_path = config.log_path.clone();
    let mut sim = Simulation::new(config)?;
    sim.run()?;

    println!("\n=== Survivors ===");
    let survivors = sim.survivors();
    for npc in &survivors {
        println!(
            "  {} \"{}\" at ({:.1}, {:.1})",
            npc.kind(),
            npc.name(),
            npc.pos().x,
            npc.pos().y
        );
    }
    println!("\nTotal survivors: {} out of {}", survivors.len(), npc_count);
    println!("\nSimulation finished. Check {} for the kill log.", log_path.display());

    Ok(())
}
