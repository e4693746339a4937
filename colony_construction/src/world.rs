// In-memory reference world.
//
// `SimWorld` implements `WorldView` and `OrderSink` over plain data so the
// scheduler can be exercised without the live game: unit and integration
// tests, the criterion bench, and offline replays of recorded territories.
//
// Each territory stores its terrain as a flat `Vec<Terrain>` indexed by
// `x + y * TERRITORY_SIZE` (O(1) reads; out-of-bounds reads return `Wall`,
// out-of-bounds writes are no-ops). Built structures and pending orders are
// sparse `BTreeMap`s keyed by tile so iteration order is deterministic.
//
// Submission follows the world's own rules, which are looser than the
// scheduler's legality check in one place (the world lets a structure go
// under an existing rampart) and stricter in others:
// - `Full` when the global hard ceiling is reached, or when the optional
//   per-territory per-tick cap is reached (reset by `advance_tick()`).
// - `InvalidTarget` for unknown territories, boundary or out-of-bounds
//   tiles, wall terrain, tiles with a pending order, tiles the world has
//   blocked (`set_tile_blocked`), and occupants that conflict with the kind.
//
// Accepted orders are visible to reads immediately. `complete_orders()`
// turns a territory's pending orders into built structures.
//
// See also: `query.rs` for the traits, `legality.rs` for the scheduler-side
// placement rules.

use crate::query::{
    Controller, EnergyLevels, OrderSink, StructureCounts, SubmitError, TileStructures, WorldView,
};
use crate::types::{StructureType, TERRITORY_SIZE, Terrain, TerritoryId, TileCoord};
use std::collections::{BTreeMap, BTreeSet};

/// One territory's world state.
#[derive(Clone, Debug)]
struct TerritoryState {
    controller: Option<Controller>,
    energy: EnergyLevels,
    builders: u32,
    /// Flat storage: index = x + y * TERRITORY_SIZE.
    terrain: Vec<Terrain>,
    structures: BTreeMap<TileCoord, TileStructures>,
    orders: BTreeMap<TileCoord, StructureType>,
    blocked: BTreeSet<TileCoord>,
    orders_this_tick: u32,
}

impl TerritoryState {
    /// An owned territory at `tier` with all-plain terrain and no structures.
    fn new(tier: u8) -> Self {
        let tiles = (TERRITORY_SIZE * TERRITORY_SIZE) as usize;
        Self {
            controller: Some(Controller { tier, owned: true }),
            energy: EnergyLevels {
                available: 300,
                capacity: 300,
                stored: 0,
            },
            builders: 0,
            terrain: vec![Terrain::Plain; tiles],
            structures: BTreeMap::new(),
            orders: BTreeMap::new(),
            blocked: BTreeSet::new(),
            orders_this_tick: 0,
        }
    }

    fn terrain(&self, position: TileCoord) -> Terrain {
        position.index().map_or(Terrain::Wall, |i| self.terrain[i])
    }

    /// Whether the world accepts `kind` on `position`, ignoring order limits.
    fn accepts(&self, position: TileCoord, kind: StructureType) -> bool {
        if !position.in_bounds() || position.on_boundary() {
            return false;
        }
        if self.terrain(position) == Terrain::Wall
            || self.orders.contains_key(&position)
            || self.blocked.contains(&position)
        {
            return false;
        }
        let occupants = self.structures.get(&position);
        let occupants = occupants.map(|s| s.as_slice()).unwrap_or(&[]);
        match kind {
            StructureType::Rampart => !occupants.contains(&StructureType::Rampart),
            _ => occupants.iter().all(|&s| s == StructureType::Rampart),
        }
    }
}

fn tally(kinds: impl Iterator<Item = StructureType>) -> StructureCounts {
    let mut counts = StructureCounts::new();
    for kind in kinds {
        *counts.entry(kind).or_insert(0) += 1;
    }
    counts
}

/// In-memory world holding any number of territories.
#[derive(Clone, Debug)]
pub struct SimWorld {
    pub tick: u64,
    territories: BTreeMap<TerritoryId, TerritoryState>,
    hard_order_ceiling: u32,
    per_tick_order_cap: Option<u32>,
}

impl SimWorld {
    /// An empty world whose global order ceiling is `hard_order_ceiling`.
    pub fn new(hard_order_ceiling: u32) -> Self {
        Self {
            tick: 0,
            territories: BTreeMap::new(),
            hard_order_ceiling,
            per_tick_order_cap: None,
        }
    }

    /// Add (or reset) an owned territory at `tier`.
    pub fn add_territory(&mut self, territory: TerritoryId, tier: u8) {
        self.territories.insert(territory, TerritoryState::new(tier));
    }

    /// Limit accepted orders per territory per tick. `None` disables it.
    pub fn set_per_tick_order_cap(&mut self, cap: Option<u32>) {
        self.per_tick_order_cap = cap;
    }

    pub fn set_controller(&mut self, territory: &TerritoryId, controller: Option<Controller>) {
        if let Some(state) = self.territories.get_mut(territory) {
            state.controller = controller;
        }
    }

    pub fn set_energy(&mut self, territory: &TerritoryId, energy: EnergyLevels) {
        if let Some(state) = self.territories.get_mut(territory) {
            state.energy = energy;
        }
    }

    pub fn set_builders(&mut self, territory: &TerritoryId, builders: u32) {
        if let Some(state) = self.territories.get_mut(territory) {
            state.builders = builders;
        }
    }

    /// Set one tile's terrain. No-op out of bounds.
    pub fn set_terrain(&mut self, territory: &TerritoryId, position: TileCoord, terrain: Terrain) {
        if let (Some(state), Some(i)) = (self.territories.get_mut(territory), position.index()) {
            state.terrain[i] = terrain;
        }
    }

    /// Mark a tile the world refuses to build on for reasons the scheduler
    /// cannot observe (e.g. a hostile unit standing on it).
    pub fn set_tile_blocked(
        &mut self,
        territory: &TerritoryId,
        position: TileCoord,
        blocked: bool,
    ) {
        if let Some(state) = self.territories.get_mut(territory) {
            if blocked {
                state.blocked.insert(position);
            } else {
                state.blocked.remove(&position);
            }
        }
    }

    /// Put a finished structure on a tile, bypassing every rule.
    pub fn place_structure(
        &mut self,
        territory: &TerritoryId,
        position: TileCoord,
        kind: StructureType,
    ) {
        if let Some(state) = self.territories.get_mut(territory) {
            state.structures.entry(position).or_default().push(kind);
        }
    }

    /// Insert a pending order directly, bypassing submission rules and
    /// limits. Replaces any order already on the tile.
    pub fn queue_order(
        &mut self,
        territory: &TerritoryId,
        position: TileCoord,
        kind: StructureType,
    ) {
        if let Some(state) = self.territories.get_mut(territory) {
            state.orders.insert(position, kind);
        }
    }

    /// Pending orders of one territory in tile order.
    pub fn orders(&self, territory: &TerritoryId) -> Vec<(TileCoord, StructureType)> {
        self.territories
            .get(territory)
            .map(|state| state.orders.iter().map(|(&p, &k)| (p, k)).collect())
            .unwrap_or_default()
    }

    /// Finish every pending order in `territory`, turning it into a built
    /// structure. Returns how many orders completed.
    pub fn complete_orders(&mut self, territory: &TerritoryId) -> usize {
        let Some(state) = self.territories.get_mut(territory) else {
            return 0;
        };
        let finished = std::mem::take(&mut state.orders);
        let count = finished.len();
        for (position, kind) in finished {
            state.structures.entry(position).or_default().push(kind);
        }
        count
    }

    /// Move to the next tick, clearing per-tick order counters.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
        for state in self.territories.values_mut() {
            state.orders_this_tick = 0;
        }
    }
}

impl WorldView for SimWorld {
    fn controller(&self, territory: &TerritoryId) -> Option<Controller> {
        self.territories.get(territory).and_then(|s| s.controller)
    }

    fn terrain(&self, territory: &TerritoryId, position: TileCoord) -> Terrain {
        self.territories
            .get(territory)
            .map_or(Terrain::Wall, |s| s.terrain(position))
    }

    fn structures_at(&self, territory: &TerritoryId, position: TileCoord) -> TileStructures {
        self.territories
            .get(territory)
            .and_then(|s| s.structures.get(&position))
            .cloned()
            .unwrap_or_default()
    }

    fn order_at(&self, territory: &TerritoryId, position: TileCoord) -> Option<StructureType> {
        self.territories
            .get(territory)
            .and_then(|s| s.orders.get(&position).copied())
    }

    fn structure_counts(&self, territory: &TerritoryId) -> StructureCounts {
        self.territories
            .get(territory)
            .map(|s| tally(s.structures.values().flatten().copied()))
            .unwrap_or_default()
    }

    fn order_counts(&self, territory: &TerritoryId) -> StructureCounts {
        self.territories
            .get(territory)
            .map(|s| tally(s.orders.values().copied()))
            .unwrap_or_default()
    }

    fn global_outstanding_orders(&self) -> u32 {
        self.territories
            .values()
            .map(|s| s.orders.len() as u32)
            .sum()
    }

    fn energy(&self, territory: &TerritoryId) -> EnergyLevels {
        self.territories
            .get(territory)
            .map(|s| s.energy)
            .unwrap_or_default()
    }

    fn builders(&self, territory: &TerritoryId) -> u32 {
        self.territories.get(territory).map_or(0, |s| s.builders)
    }
}

impl OrderSink for SimWorld {
    fn submit_order(
        &mut self,
        territory: &TerritoryId,
        position: TileCoord,
        kind: StructureType,
    ) -> Result<(), SubmitError> {
        let outstanding = self.global_outstanding_orders();
        let cap = self.per_tick_order_cap;
        let state = self
            .territories
            .get_mut(territory)
            .ok_or(SubmitError::InvalidTarget)?;

        if outstanding >= self.hard_order_ceiling {
            return Err(SubmitError::Full);
        }
        if cap.is_some_and(|cap| state.orders_this_tick >= cap) {
            return Err(SubmitError::Full);
        }
        if !state.accepts(position, kind) {
            return Err(SubmitError::InvalidTarget);
        }

        state.orders.insert(position, kind);
        state.orders_this_tick += 1;
        Ok(())
    }
}
