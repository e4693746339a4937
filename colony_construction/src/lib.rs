// colony_construction — per-tick construction-order scheduler.
//
// Each world tick, for each territory it owns, a colony agent turns the
// planner's prioritized backlog of desired structures into construction
// orders. This crate decides which tasks become orders: it respects a
// throughput budget derived from the territory's economy, the world's global
// order ceiling, the per-tier structure limits, declared dependencies and
// tile legality. It chooses no positions and runs no economy; planning and
// the live world sit behind the traits in `query.rs`.
//
// Module overview:
// - `types.rs`:      TileCoord, TerritoryId, StructureType, Terrain, PriorityTier.
// - `config.rs`:     SchedulerConfig + BudgetConfig, JSON loading and validation.
// - `plan.rs`:       Task and Plan, the planner-owned backlog.
// - `query.rs`:      WorldView / OrderSink traits (the world boundary).
// - `census.rs`:     Per-pass snapshot of built and queued structure counts.
// - `capacity.rs`:   Per-tier structure limits as a total function.
// - `dependency.rs`: Dependency gate over built structures.
// - `legality.rs`:   Tile legality (bounds, terrain, occupants, pending orders).
// - `budget.rs`:     Orders-per-tick budget and global headroom arithmetic.
// - `executor.rs`:   The scheduling pass: pure validation, submission, PassReport.
// - `colony.rs`:     Multi-territory driver sharing one global headroom.
// - `world.rs`:      SimWorld, an in-memory world for tests, benches and replays.
//
// **Determinism.** A pass is a pure function of the world reads and the
// plan: no randomness, no clocks, no state kept between passes. Collections
// that are iterated are `BTreeMap`s; the only hash set (tiles claimed within
// a pass) is used for membership tests only.

pub mod budget;
pub mod capacity;
pub mod census;
pub mod colony;
pub mod config;
pub mod dependency;
pub mod executor;
pub mod legality;
pub mod plan;
pub mod query;
pub mod types;
pub mod world;

pub use colony::{ColonyReport, schedule_colony};
pub use config::{ConfigError, SchedulerConfig};
pub use executor::{
    PassOutcome, PassReport, SkipReason, Verdict, schedule_territory,
    schedule_territory_with_headroom,
};
pub use plan::{Plan, Task};
pub use query::{OrderSink, SubmitError, WorldView};
pub use types::{PriorityTier, StructureType, TerritoryId, TileCoord};
