// Core types shared across the construction scheduler.
//
// Defines territory-relative tile coordinates (`TileCoord`), the territory
// identifier (`TerritoryId`), the closed enumeration of buildable structure
// kinds (`StructureType`), terrain classes, and the three planner priority
// tiers. All types derive `Serialize` and `Deserialize` so plans and world
// fixtures can cross a JSON boundary.
//
// A territory is a square grid of `TERRITORY_SIZE` x `TERRITORY_SIZE` tiles.
// The outermost ring of tiles (x or y equal to 0 or `TERRITORY_SIZE - 1`) is
// the boundary ring and never accepts construction.
//
// See also: `plan.rs` for `Task`, which combines these types, `capacity.rs`
// for the per-tier limits keyed by `StructureType`, `legality.rs` for how
// `Terrain` and the boundary ring gate placement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of every territory, in tiles.
pub const TERRITORY_SIZE: i32 = 50;

/// Highest development tier a territory can reach. Tiers above this are
/// treated as this tier by the capacity and budget tables.
pub const MAX_TIER: u8 = 8;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A territory-relative tile position.
///
/// - X: east (positive) / west (negative)
/// - Y: south (positive) / north (negative)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the tile lies anywhere inside the territory grid.
    pub fn in_bounds(self) -> bool {
        (0..TERRITORY_SIZE).contains(&self.x) && (0..TERRITORY_SIZE).contains(&self.y)
    }

    /// Whether the tile is on the outer boundary ring. Out-of-bounds tiles
    /// are not on the ring.
    pub fn on_boundary(self) -> bool {
        self.in_bounds()
            && (self.x == 0
                || self.y == 0
                || self.x == TERRITORY_SIZE - 1
                || self.y == TERRITORY_SIZE - 1)
    }

    /// Flat grid index (`x + y * TERRITORY_SIZE`). `None` if out of bounds.
    pub fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some((self.x + self.y * TERRITORY_SIZE) as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Terrain class of a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Plain,
    Swamp,
    /// Impassable natural rock. Nothing can be built here.
    Wall,
}

// ---------------------------------------------------------------------------
// Territory identifier
// ---------------------------------------------------------------------------

/// Name of a territory the agent may build in (e.g. `"W7N3"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerritoryId(pub String);

impl TerritoryId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TerritoryId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Structure kinds
// ---------------------------------------------------------------------------

/// Every kind of structure the agent can order. Closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StructureType {
    Spawn,
    Extension,
    Road,
    /// Perimeter defense. May overlay any other structure.
    Rampart,
    Wall,
    Tower,
    Storage,
    Link,
    Container,
    Extractor,
    Lab,
    Terminal,
    Factory,
    Observer,
    PowerSpawn,
    Nuker,
}

impl StructureType {
    pub const ALL: [StructureType; 16] = [
        StructureType::Spawn,
        StructureType::Extension,
        StructureType::Road,
        StructureType::Rampart,
        StructureType::Wall,
        StructureType::Tower,
        StructureType::Storage,
        StructureType::Link,
        StructureType::Container,
        StructureType::Extractor,
        StructureType::Lab,
        StructureType::Terminal,
        StructureType::Factory,
        StructureType::Observer,
        StructureType::PowerSpawn,
        StructureType::Nuker,
    ];

    /// Canonical lowercase label, as planners write it in dependency lists.
    pub fn label(self) -> &'static str {
        match self {
            StructureType::Spawn => "spawn",
            StructureType::Extension => "extension",
            StructureType::Road => "road",
            StructureType::Rampart => "rampart",
            StructureType::Wall => "wall",
            StructureType::Tower => "tower",
            StructureType::Storage => "storage",
            StructureType::Link => "link",
            StructureType::Container => "container",
            StructureType::Extractor => "extractor",
            StructureType::Lab => "lab",
            StructureType::Terminal => "terminal",
            StructureType::Factory => "factory",
            StructureType::Observer => "observer",
            StructureType::PowerSpawn => "powerSpawn",
            StructureType::Nuker => "nuker",
        }
    }

    /// Parse a planner label. Case-insensitive; `_`, `-` and spaces are
    /// ignored, so `"power_spawn"`, `"PowerSpawn"` and `"powerSpawn"` all
    /// match. `"constructedWall"` is accepted for `Wall`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let kind = match normalized.as_str() {
            "spawn" => StructureType::Spawn,
            "extension" => StructureType::Extension,
            "road" => StructureType::Road,
            "rampart" => StructureType::Rampart,
            "wall" | "constructedwall" => StructureType::Wall,
            "tower" => StructureType::Tower,
            "storage" => StructureType::Storage,
            "link" => StructureType::Link,
            "container" => StructureType::Container,
            "extractor" => StructureType::Extractor,
            "lab" => StructureType::Lab,
            "terminal" => StructureType::Terminal,
            "factory" => StructureType::Factory,
            "observer" => StructureType::Observer,
            "powerspawn" => StructureType::PowerSpawn,
            "nuker" => StructureType::Nuker,
            _ => return None,
        };
        Some(kind)
    }

    /// Roads and ramparts are the two kinds that may share a tile with
    /// other structures.
    pub fn is_overlay(self) -> bool {
        matches!(self, StructureType::Road | StructureType::Rampart)
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Priority tiers
// ---------------------------------------------------------------------------

/// Planner priority tier. Tasks are processed strictly in the order of
/// `PriorityTier::ORDER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriorityTier {
    Critical,
    Important,
    Normal,
}

impl PriorityTier {
    pub const ORDER: [PriorityTier; 3] = [
        PriorityTier::Critical,
        PriorityTier::Important,
        PriorityTier::Normal,
    ];
}
