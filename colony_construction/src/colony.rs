// Colony driver: one tick of scheduling across every territory.
//
// Territories compete for a single resource, the global outstanding-order
// headroom. `schedule_colony()` runs territories in `BTreeMap` order (stable
// across ticks) and hands each pass an explicit headroom computed from the
// larger of
// - the ledger as the world reports it right now, and
// - the ledger at the start of the tick plus every order placed so far.
//
// The second term covers worlds that only surface new orders on the next
// tick: without it, every territory would see the same starting ledger and
// together they could overshoot the ceiling.
//
// See also: `executor.rs` for the per-territory pass.

use crate::budget::remaining_global;
use crate::config::SchedulerConfig;
use crate::executor::{PassReport, schedule_territory_with_headroom};
use crate::plan::Plan;
use crate::query::{OrderSink, WorldView};
use crate::types::TerritoryId;
use std::collections::BTreeMap;

/// Result of scheduling every territory for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColonyReport {
    /// Global outstanding orders observed before the first pass.
    pub starting_outstanding: u32,
    /// One report per territory, in scheduling order.
    pub passes: Vec<PassReport>,
}

impl ColonyReport {
    pub fn placed_count(&self) -> u32 {
        self.passes.iter().map(PassReport::placed_count).sum()
    }

    pub fn pass(&self, territory: &TerritoryId) -> Option<&PassReport> {
        self.passes.iter().find(|p| p.territory == *territory)
    }
}

/// Schedule every territory in `plans` against the shared global headroom.
pub fn schedule_colony<W: WorldView + OrderSink + ?Sized>(
    world: &mut W,
    plans: &BTreeMap<TerritoryId, Plan>,
    config: &SchedulerConfig,
) -> ColonyReport {
    let starting_outstanding = world.global_outstanding_orders();
    let mut placed_so_far = 0u32;
    let mut passes = Vec::with_capacity(plans.len());

    for (territory, plan) in plans {
        let outstanding = world
            .global_outstanding_orders()
            .max(starting_outstanding.saturating_add(placed_so_far));
        let headroom = remaining_global(config, outstanding);

        let report = schedule_territory_with_headroom(world, plan, territory, headroom, config);
        placed_so_far += report.placed_count();
        passes.push(report);
    }

    log::debug!(
        "colony tick: {} territories, {placed_so_far} orders placed, ledger {} -> {}",
        passes.len(),
        starting_outstanding,
        world.global_outstanding_orders()
    );

    ColonyReport {
        starting_outstanding,
        passes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::PassOutcome;
    use crate::plan::Task;
    use crate::query::{Controller, EnergyLevels, StructureCounts, SubmitError, TileStructures};
    use crate::types::{PriorityTier, StructureType, Terrain, TileCoord};
    use crate::world::SimWorld;

    /// A world whose ledger only catches up when the tick advances.
    struct DeferredLedger {
        inner: SimWorld,
        ledger: u32,
    }

    impl DeferredLedger {
        fn new(inner: SimWorld) -> Self {
            let ledger = inner.global_outstanding_orders();
            Self { inner, ledger }
        }
    }

    impl WorldView for DeferredLedger {
        fn controller(&self, t: &TerritoryId) -> Option<Controller> {
            self.inner.controller(t)
        }
        fn terrain(&self, t: &TerritoryId, p: TileCoord) -> Terrain {
            self.inner.terrain(t, p)
        }
        fn structures_at(&self, t: &TerritoryId, p: TileCoord) -> TileStructures {
            self.inner.structures_at(t, p)
        }
        fn order_at(&self, t: &TerritoryId, p: TileCoord) -> Option<StructureType> {
            self.inner.order_at(t, p)
        }
        fn structure_counts(&self, t: &TerritoryId) -> StructureCounts {
            self.inner.structure_counts(t)
        }
        fn order_counts(&self, t: &TerritoryId) -> StructureCounts {
            self.inner.order_counts(t)
        }
        fn global_outstanding_orders(&self) -> u32 {
            self.ledger
        }
        fn energy(&self, t: &TerritoryId) -> EnergyLevels {
            self.inner.energy(t)
        }
        fn builders(&self, t: &TerritoryId) -> u32 {
            self.inner.builders(t)
        }
    }

    impl OrderSink for DeferredLedger {
        fn submit_order(
            &mut self,
            t: &TerritoryId,
            p: TileCoord,
            kind: StructureType,
        ) -> Result<(), SubmitError> {
            self.inner.submit_order(t, p, kind)
        }
    }

    fn busy_territory(world: &mut SimWorld, name: &str) -> TerritoryId {
        let id = TerritoryId::from(name);
        world.add_territory(id.clone(), 8);
        world.set_builders(&id, 10);
        world.set_energy(
            &id,
            EnergyLevels {
                available: 5600,
                capacity: 5600,
                stored: 300_000,
            },
        );
        id
    }

    fn road_plan(territory: &TerritoryId, count: i32) -> Plan {
        let mut plan = Plan::new();
        for x in 0..count {
            let position = TileCoord::new(5 + x, 20);
            let task = Task::new(territory.clone(), position, StructureType::Road, "road");
            plan.push(PriorityTier::Normal, task);
        }
        plan
    }

    fn fill_ledger(world: &mut SimWorld, orders: i32) {
        let filler = TerritoryId::from("filler");
        world.add_territory(filler.clone(), 0);
        world.set_controller(&filler, None);
        for i in 0..orders {
            let tile = TileCoord::new(1 + i % 48, 1 + i / 48);
            world.queue_order(&filler, tile, StructureType::Road);
        }
    }

    #[test]
    fn territories_share_the_headroom() {
        let mut world = SimWorld::new(100);
        let a = busy_territory(&mut world, "W1N1");
        let b = busy_territory(&mut world, "W2N1");
        fill_ledger(&mut world, 88);
        let plans = BTreeMap::from([
            (a.clone(), road_plan(&a, 10)),
            (b.clone(), road_plan(&b, 10)),
        ]);

        let report = schedule_colony(&mut world, &plans, &SchedulerConfig::default());

        // Effective ceiling 95, ledger 88: seven orders between both.
        assert_eq!(report.starting_outstanding, 88);
        assert_eq!(report.pass(&a).map(|p| p.placed_count()), Some(5));
        assert_eq!(report.pass(&b).map(|p| p.headroom), Some(2));
        assert_eq!(report.placed_count(), 7);
        assert_eq!(world.global_outstanding_orders(), 95);
    }

    #[test]
    fn exhausted_headroom_leaves_later_territories_idle() {
        let mut world = SimWorld::new(100);
        let a = busy_territory(&mut world, "W1N1");
        let b = busy_territory(&mut world, "W2N1");
        fill_ledger(&mut world, 92);
        let plans = BTreeMap::from([
            (a.clone(), road_plan(&a, 10)),
            (b.clone(), road_plan(&b, 10)),
        ]);

        let report = schedule_colony(&mut world, &plans, &SchedulerConfig::default());

        assert_eq!(report.pass(&a).map(|p| p.placed_count()), Some(3));
        assert_eq!(report.pass(&b).map(|p| p.outcome), Some(PassOutcome::NoHeadroom));
    }

    #[test]
    fn deferred_ledger_does_not_overshoot() {
        let mut sim = SimWorld::new(100);
        let a = busy_territory(&mut sim, "W1N1");
        let b = busy_territory(&mut sim, "W2N1");
        let c = busy_territory(&mut sim, "W3N1");
        fill_ledger(&mut sim, 86);
        let mut world = DeferredLedger::new(sim);
        let plans = BTreeMap::from([
            (a.clone(), road_plan(&a, 10)),
            (b.clone(), road_plan(&b, 10)),
            (c.clone(), road_plan(&c, 10)),
        ]);

        let report = schedule_colony(&mut world, &plans, &SchedulerConfig::default());

        assert_eq!(report.placed_count(), 9);
        assert_eq!(world.inner.global_outstanding_orders(), 95);
        assert_eq!(report.pass(&c).map(|p| p.outcome), Some(PassOutcome::NoHeadroom));
    }

    #[test]
    fn empty_colony_is_empty_report() {
        let mut world = SimWorld::new(100);
        let report = schedule_colony(&mut world, &BTreeMap::new(), &SchedulerConfig::default());
        assert!(report.passes.is_empty());
        assert_eq!(report.placed_count(), 0);
    }
}
