// The scheduler's boundary with the world.
//
// The scheduler never owns world state. Everything it knows about terrain,
// existing structures, pending orders, energy, population and the global
// order ledger comes through `WorldView`, and the only mutation it performs
// goes through `OrderSink::submit_order`. Production code implements these
// traits over the live game API; `world.rs` provides `SimWorld`, an
// in-memory implementation used by tests, benches and offline replays.
//
// All reads are expected to reflect the world as of the call. Whether an
// accepted order becomes visible to reads within the same tick is up to the
// implementation; the scheduler does not rely on it (see `census.rs` and
// `colony.rs` for how it tracks its own submissions).

use crate::types::{StructureType, Terrain, TerritoryId, TileCoord};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use thiserror::Error;

/// Structures standing on one tile. At most a base structure plus road and
/// rampart overlays in practice.
pub type TileStructures = SmallVec<[StructureType; 3]>;

/// Per-kind counts for one territory.
pub type StructureCounts = BTreeMap<StructureType, u32>;

/// The controlling authority of a territory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controller {
    /// Development tier.
    pub tier: u8,
    /// Whether the agent owns the controller. Unowned territories are never
    /// scheduled.
    pub owned: bool,
}

/// Energy readings for one territory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnergyLevels {
    /// Energy currently available for spawning.
    pub available: u32,
    /// Maximum spawn energy.
    pub capacity: u32,
    /// Energy held in long-term storage.
    pub stored: u32,
}

/// Why the world refused an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The tile cannot take that structure (terrain, occupant, bounds).
    #[error("invalid construction target")]
    InvalidTarget,
    /// A world-side order limit (global or per-territory) is reached.
    #[error("construction order limit reached")]
    Full,
}

/// Read-only world queries.
pub trait WorldView {
    fn controller(&self, territory: &TerritoryId) -> Option<Controller>;

    fn terrain(&self, territory: &TerritoryId, position: TileCoord) -> Terrain;

    fn structures_at(&self, territory: &TerritoryId, position: TileCoord) -> TileStructures;

    /// The pending construction order on a tile, if any.
    fn order_at(&self, territory: &TerritoryId, position: TileCoord) -> Option<StructureType>;

    /// Built structures by kind.
    fn structure_counts(&self, territory: &TerritoryId) -> StructureCounts;

    /// Pending construction orders by kind.
    fn order_counts(&self, territory: &TerritoryId) -> StructureCounts;

    /// Outstanding construction orders across every territory.
    fn global_outstanding_orders(&self) -> u32;

    fn energy(&self, territory: &TerritoryId) -> EnergyLevels;

    /// Number of builder-class units serving the territory.
    fn builders(&self, territory: &TerritoryId) -> u32;
}

/// The single world mutation the scheduler performs.
pub trait OrderSink {
    fn submit_order(
        &mut self,
        territory: &TerritoryId,
        position: TileCoord,
        kind: StructureType,
    ) -> Result<(), SubmitError>;
}
