//! The concurrent runtime: lifecycle, shared state, and the three loops
//!
//! Lock discipline: the roster sits behind a reader/writer lock (movement
//! and liveness flips take the writer form briefly, reporting reads), the
//! task queue behind a plain mutex, and shutdown is a single atomic flag
//! every loop polls once per period.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::{confirm, eligibility, roll_d6};
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::entity::{Npc, Roster};
use crate::observer::{CombatEvent, ConsoleObserver, LogObserver, ObserverRegistry};
use crate::simulation::{report, spawn};

/// How often the controlling call re-checks the stop flag while waiting out
/// the run duration.
const STOP_POLL: Duration = Duration::from_millis(25);

/// Lifecycle state of a run; `Stopped` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Stopping,
    Stopped,
}

/// A pending combat between two roster entries
///
/// Holds indices, not owned NPCs: the roster is append-only for the run, so
/// indices stay valid. Either side may die before the task is processed, in
/// which case it is discarded without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatTask {
    pub attacker: usize,
    pub defender: usize,
}

struct Shared {
    config: SimulationConfig,
    roster: RwLock<Roster>,
    queue: Mutex<VecDeque<CombatTask>>,
    observers: ObserverRegistry,
    stop: AtomicBool,
}

/// Cloneable handle for raising the stop flag early; idempotent
#[derive(Clone)]
pub struct StopHandle {
    shared: Arc<Shared>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::Relaxed);
    }
}

/// One fixed-duration simulation run
pub struct Simulation {
    shared: Arc<Shared>,
    state: RunState,
}

impl Simulation {
    /// Build a simulation with the standard sinks attached: console lines
    /// plus the append-only kill log.
    ///
    /// A log file that cannot be opened aborts setup here, before any loop
    /// starts.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let sim = Self::bare(config);
        sim.shared.observers.attach(Arc::new(ConsoleObserver));
        let log = LogObserver::open(&sim.shared.config.log_path)?;
        sim.shared.observers.attach(Arc::new(log));
        Ok(sim)
    }

    /// Build a simulation with no sinks attached; callers wire their own.
    pub fn bare(config: SimulationConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                roster: RwLock::new(Roster::new()),
                queue: Mutex::new(VecDeque::new()),
                observers: ObserverRegistry::new(),
                stop: AtomicBool::new(false),
            }),
            state: RunState::Idle,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.shared.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.shared.observers
    }

    pub fn roster(&self) -> &RwLock<Roster> {
        &self.shared.roster
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Clones of the NPCs still alive, in roster order
    pub fn survivors(&self) -> Vec<Npc> {
        self.shared
            .roster
            .read()
            .iter_living()
            .map(|(_, npc)| npc.clone())
            .collect()
    }

    /// Run the full lifecycle: populate the roster, launch the three loops,
    /// wait out the configured duration (or an early stop), then join.
    ///
    /// Blocks until every loop has observed the stop flag and returned.
    /// A simulation runs at most once; `Stopped` is terminal.
    pub fn run(&mut self) -> Result<()> {
        if self.state != RunState::Idle {
            return Err(SimError::AlreadyRan);
        }

        {
            let mut roster = self.shared.roster.write();
            match self.shared.config.spawn_seed {
                Some(seed) => {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    spawn::populate(&mut roster, &self.shared.config, &mut rng)?;
                }
                None => {
                    spawn::populate(&mut roster, &self.shared.config, &mut rand::thread_rng())?;
                }
            }
        }

        self.state = RunState::Running;
        tracing::info!(
            npc_count = self.shared.config.npc_count,
            duration_secs = self.shared.config.run_duration.as_secs_f64(),
            "simulation running"
        );

        let movement = self.spawn_loop("movement", movement_loop);
        let combat = self.spawn_loop("combat", combat_loop);
        let reporting = self.spawn_loop("report", report_loop);

        let started = Instant::now();
        while !self.shared.stop.load(Ordering::Relaxed)
            && started.elapsed() < self.shared.config.run_duration
        {
            thread::sleep(STOP_POLL);
        }

        self.shared.stop.store(true, Ordering::Relaxed);
        self.state = RunState::Stopping;
        tracing::debug!("stop flag raised, joining loops");

        for handle in [movement, combat, reporting] {
            if handle.join().is_err() {
                tracing::error!("simulation loop panicked");
            }
        }

        self.state = RunState::Stopped;
        tracing::info!(elapsed = ?started.elapsed(), "simulation stopped");
        Ok(())
    }

    fn spawn_loop(&self, name: &str, body: fn(&Shared)) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        tracing::debug!("spawning {name} loop");
        thread::spawn(move || body(&shared))
    }
}

/// Movement loop: advance every living NPC, then scan living pairs for
/// kill-range proximity and enqueue tasks.
///
/// Mutation and scan happen under a single exclusive roster hold per tick so
/// the proximity snapshot is consistent.
fn movement_loop(shared: &Shared) {
    let mut rng = rand::thread_rng();
    let config = &shared.config;

    while !shared.stop.load(Ordering::Relaxed) {
        thread::sleep(config.movement_period);

        let mut roster = shared.roster.write();

        for npc in roster.as_mut_slice() {
            if !npc.is_alive() {
                continue;
            }
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let step = npc.kind().move_radius() * config.move_step_fraction;
            npc.advance(angle.cos() * step, angle.sin() * step, config.map_size);
        }

        let npcs = roster.as_slice();
        for i in 0..npcs.len() {
            if !npcs[i].is_alive() {
                continue;
            }
            for j in i + 1..npcs.len() {
                if !npcs[j].is_alive() {
                    continue;
                }
                // initiative belongs to the scanning side: only the lower
                // index's kill radius is consulted
                if npcs[i].distance_to(&npcs[j]) <= npcs[i].kind().kill_radius() {
                    shared.queue.lock().push_back(CombatTask {
                        attacker: i,
                        defender: j,
                    });
                }
            }
        }
    }
}

/// Combat loop: one task per iteration, processed to completion before the
/// next pop. An empty queue just waits for the next period.
fn combat_loop(shared: &Shared) {
    let mut rng = rand::thread_rng();

    while !shared.stop.load(Ordering::Relaxed) {
        thread::sleep(shared.config.combat_period);

        let task = shared.queue.lock().pop_front();
        let Some(task) = task else { continue };

        let mut dice = || roll_d6(&mut rng);
        resolve_task(&shared.roster, &shared.observers, task, &mut dice);
    }
}

/// Reporting loop: read-only snapshot rendered once per period.
fn report_loop(shared: &Shared) {
    let started = Instant::now();

    while !shared.stop.load(Ordering::Relaxed) {
        thread::sleep(shared.config.report_period);

        let snapshot = {
            let roster = shared.roster.read();
            report::render_map(&roster, &shared.config, started.elapsed())
        };
        println!("{snapshot}");
    }
}

/// Resolve one queued combat to completion: staleness check, eligibility,
/// randomized confirmation, liveness flip, then a single notification.
///
/// A task whose attacker or defender is already dead is discarded with no
/// effect. The notification fires after the roster write lock is released so
/// sink code never runs under it.
pub fn resolve_task(
    roster: &RwLock<Roster>,
    observers: &ObserverRegistry,
    task: CombatTask,
    dice: &mut dyn FnMut() -> u8,
) {
    let (attacker_kind, defender_kind) = {
        let roster = roster.read();
        let (Some(attacker), Some(defender)) = (roster.get(task.attacker), roster.get(task.defender))
        else {
            return;
        };
        if !attacker.is_alive() || !defender.is_alive() {
            // stale task, one side died since it was enqueued
            return;
        }
        (attacker.kind(), defender.kind())
    };

    let verdict = confirm(eligibility(attacker_kind, defender_kind), dice);
    if !verdict.any() {
        return;
    }

    let event = {
        let mut roster = roster.write();
        {
            // re-check under the write lock; the pair may have died between
            // the read above and acquiring it
            let (Some(attacker), Some(defender)) =
                (roster.get(task.attacker), roster.get(task.defender))
            else {
                return;
            };
            if !attacker.is_alive() || !defender.is_alive() {
                return;
            }
        }

        if verdict.defender_died {
            if let Some(defender) = roster.get_mut(task.defender) {
                defender.kill();
            }
        }
        if verdict.attacker_died {
            if let Some(attacker) = roster.get_mut(task.attacker) {
                attacker.kill();
            }
        }

        match (roster.get(task.attacker), roster.get(task.defender)) {
            (Some(attacker), Some(defender)) => CombatEvent::new(attacker, defender, verdict),
            _ => return,
        }
    };

    observers.notify(&event);
}
