// Structure-count snapshot for one scheduling pass.
//
// `StructureCensus` is taken from the world at the start of every pass and
// holds, per structure kind, how many are built and how many construction
// orders are already queued. It is never kept between passes: stale counts
// after a world mutation would let a later pass overshoot a capacity
// ceiling. During the pass the executor calls `record_order()` after each
// accepted submission, so capacity checks see this pass's own orders even
// when the world only surfaces them on the next tick.
//
// See also: `capacity.rs` for the ceilings the totals are compared against,
// `dependency.rs` which only looks at built counts.

use crate::query::{StructureCounts, WorldView};
use crate::types::{StructureType, TerritoryId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructureCensus {
    built: StructureCounts,
    queued: StructureCounts,
}

impl StructureCensus {
    /// Read built and queued counts for `territory` from the world.
    pub fn take<W: WorldView + ?Sized>(world: &W, territory: &TerritoryId) -> Self {
        Self {
            built: world.structure_counts(territory),
            queued: world.order_counts(territory),
        }
    }

    pub fn from_counts(built: StructureCounts, queued: StructureCounts) -> Self {
        Self { built, queued }
    }

    pub fn built(&self, kind: StructureType) -> u32 {
        self.built.get(&kind).copied().unwrap_or(0)
    }

    pub fn queued(&self, kind: StructureType) -> u32 {
        self.queued.get(&kind).copied().unwrap_or(0)
    }

    /// Built plus queued: everything that counts against a capacity ceiling.
    pub fn committed(&self, kind: StructureType) -> u32 {
        self.built(kind) + self.queued(kind)
    }

    /// Count an order accepted during the current pass.
    pub fn record_order(&mut self, kind: StructureType) {
        *self.queued.entry(kind).or_insert(0) += 1;
    }
}
