//! The NPC record: a closed kind set plus mutable position and liveness
//!
//! Kind is fixed for an NPC's lifetime and determines its movement radius
//! and kill radius. Position mutations clamp to the map bounds; liveness
//! only ever transitions alive -> dead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Point;

/// Closed set of NPC kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    Orc,
    Knight,
    Bear,
}

impl NpcKind {
    pub const ALL: [NpcKind; 3] = [NpcKind::Orc, NpcKind::Knight, NpcKind::Bear];

    /// Maximum per-tick displacement magnitude (world units)
    pub fn move_radius(self) -> f64 {
        match self {
            Self::Orc => 20.0,
            Self::Knight => 30.0,
            Self::Bear => 5.0,
        }
    }

    /// Distance within which this kind may initiate combat
    pub fn kill_radius(self) -> f64 {
        match self {
            Self::Orc => 10.0,
            Self::Knight => 10.0,
            Self::Bear => 10.0,
        }
    }

    /// Symbol used on the rendered status grid
    pub fn symbol(self) -> char {
        match self {
            Self::Orc => 'O',
            Self::Knight => 'K',
            Self::Bear => 'B',
        }
    }

    /// The one kind this kind defeats in the cyclic matchup
    pub fn prey(self) -> NpcKind {
        match self {
            Self::Knight => Self::Orc,
            Self::Bear => Self::Knight,
            Self::Orc => Self::Bear,
        }
    }
}

impl fmt::Display for NpcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Orc => "Orc",
            Self::Knight => "Knight",
            Self::Bear => "Bear",
        };
        f.write_str(name)
    }
}

impl FromStr for NpcKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "orc" => Ok(Self::Orc),
            "knight" => Ok(Self::Knight),
            "bear" => Ok(Self::Bear),
            _ => Err(SimError::UnknownKind(s.to_string())),
        }
    }
}

/// An autonomous entity on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    name: String,
    kind: NpcKind,
    pos: Point,
    alive: bool,
}

impl Npc {
    /// Construct an NPC, failing if the position lies outside `[0, bound]`
    /// on either axis.
    pub fn new(kind: NpcKind, name: impl Into<String>, x: f64, y: f64, bound: f64) -> Result<Self> {
        if !(0.0..=bound).contains(&x) || !(0.0..=bound).contains(&y) {
            return Err(SimError::InvalidCoordinates { x, y, bound });
        }
        Ok(Self {
            name: name.into(),
            kind,
            pos: Point::new(x, y),
            alive: true,
        })
    }

    /// String-keyed variant of the factory, used by the roster file loader
    pub fn from_kind_str(kind: &str, name: impl Into<String>, x: f64, y: f64, bound: f64) -> Result<Self> {
        Self::new(kind.parse()?, name, x, y, bound)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NpcKind {
        self.kind
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// One-way transition; a dead NPC is never resurrected.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Displace by (dx, dy), clamping each axis to `[0, bound]`.
    ///
    /// Out-of-range deltas are clamped, not rejected: the position invariant
    /// holds after every mutation.
    pub fn advance(&mut self, dx: f64, dy: f64, bound: f64) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, bound);
        self.pos.y = (self.pos.y + dy).clamp(0.0, bound);
    }

    pub fn distance_to(&self, other: &Npc) -> f64 {
        self.pos.distance(&other.pos)
    }
}
