//! Notification fan-out for confirmed combat outcomes
//!
//! Sinks are delivered to synchronously, in attachment order. The registry
//! snapshots its sink list before delivery so no lock is held across sink
//! code, and a failing sink never blocks the remaining ones.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::combat::Verdict;
use crate::core::error::Result;
use crate::entity::{Npc, NpcKind};

/// A confirmed combat outcome, delivered at most once per resolution
#[derive(Debug, Clone)]
pub struct CombatEvent {
    pub attacker_kind: NpcKind,
    pub attacker_name: String,
    pub defender_kind: NpcKind,
    pub defender_name: String,
    pub attacker_died: bool,
    pub defender_died: bool,
}

impl CombatEvent {
    pub fn new(attacker: &Npc, defender: &Npc, verdict: Verdict) -> Self {
        Self {
            attacker_kind: attacker.kind(),
            attacker_name: attacker.name().to_string(),
            defender_kind: defender.kind(),
            defender_name: defender.name().to_string(),
            attacker_died: verdict.attacker_died,
            defender_died: verdict.defender_died,
        }
    }

    /// One `<WinnerKind> <WinnerName> killed <LoserKind> <LoserName>` line
    /// per death in this outcome.
    pub fn kill_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.defender_died {
            lines.push(format!(
                "{} {} killed {} {}",
                self.attacker_kind, self.attacker_name, self.defender_kind, self.defender_name
            ));
        }
        if self.attacker_died {
            lines.push(format!(
                "{} {} killed {} {}",
                self.defender_kind, self.defender_name, self.attacker_kind, self.attacker_name
            ));
        }
        lines
    }
}

/// A notification sink
///
/// Errors are per-delivery: a failure is logged by the registry and must not
/// prevent delivery to subsequent sinks or to the next event.
pub trait CombatObserver: Send + Sync {
    fn on_combat(&self, event: &CombatEvent) -> Result<()>;
}

/// Writes human-readable kill lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl CombatObserver for ConsoleObserver {
    fn on_combat(&self, event: &CombatEvent) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for line in event.kill_lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// Appends kill lines to a durable log file
#[derive(Debug)]
pub struct LogObserver {
    file: Mutex<File>,
}

impl LogObserver {
    /// Open (or create) the backing file in append mode.
    ///
    /// Failure here is fatal at setup, before any loop starts.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }
}

impl CombatObserver for LogObserver {
    fn on_combat(&self, event: &CombatEvent) -> Result<()> {
        let mut file = self.file.lock();
        for line in event.kill_lines() {
            writeln!(file, "{line}")?;
        }
        Ok(())
    }
}

/// Ordered set of sinks; attach/detach are safe concurrently with delivery
#[derive(Default)]
pub struct ObserverRegistry {
    sinks: RwLock<Vec<Arc<dyn CombatObserver>>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, sink: Arc<dyn CombatObserver>) {
        self.sinks.write().push(sink);
    }

    pub fn detach(&self, sink: &Arc<dyn CombatObserver>) {
        self.sinks.write().retain(|s| !Arc::ptr_eq(s, sink));
    }

    pub fn len(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.read().is_empty()
    }

    /// Deliver an event to every sink in attachment order.
    ///
    /// Works off a snapshot of the sink list, so structural mutation never
    /// races with iteration and no lock is held across sink code.
    pub fn notify(&self, event: &CombatEvent) {
        let sinks: Vec<Arc<dyn CombatObserver>> = self.sinks.read().clone();
        for sink in sinks {
            if let Err(err) = sink.on_combat(event) {
                tracing::warn!("combat sink failed: {err}");
            }
        }
    }
}
