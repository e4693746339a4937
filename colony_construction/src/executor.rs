// Scheduler/executor: one stateless scheduling pass for one territory.
//
// A pass turns the planner's backlog into construction orders:
//
// 1. No-op unless the territory has an owned controller and a non-empty plan.
// 2. No-op when the global headroom (`budget::remaining_global`) is zero.
// 3. Compute the local budget, capped at the headroom.
// 4. Walk `Plan::ordered()` (critical, important, normal; planner order
//    within a tier). Each task goes through `validate()`, a pure function
//    over the world reads, the pass census and the tiles already claimed in
//    this pass. Accepted tasks are submitted; rejected ones are recorded and
//    the walk continues.
// 5. Each successful submission spends one unit of budget and updates the
//    census. The walk stops when the budget reaches zero.
//
// A submission the world refuses (`SubmitError`) is recorded as a skip,
// never retried within the pass, and never aborts it. Nothing survives
// between passes: a skipped task is retried next tick if the planner still
// has it.
//
// Every successful submission emits one `info` line naming territory, kind,
// tile and the task's reason. Skips are logged at `trace`.
//
// See also: `colony.rs` for running passes across territories with a shared
// headroom, `budget.rs`, `capacity.rs`, `dependency.rs`, `legality.rs` for
// the individual checks.

use crate::budget::{self, TerritorySignals};
use crate::capacity::capacity;
use crate::census::StructureCensus;
use crate::config::SchedulerConfig;
use crate::dependency::unmet_dependency;
use crate::legality::{holds_same_kind, placeable};
use crate::plan::{Plan, Task};
use crate::query::{OrderSink, SubmitError, WorldView};
use crate::types::{PriorityTier, StructureType, TerritoryId, TileCoord};
use rustc_hash::FxHashSet;

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// Why a task was not turned into an order this pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The task belongs to a different territory than the one scheduled.
    OtherTerritory,
    /// A declared dependency has no built structure yet.
    DependencyUnmet(StructureType),
    /// Built plus queued already meets the tier's limit for the kind.
    CapacityReached,
    /// The tile cannot take the kind (bounds, terrain, occupants, pending order).
    Illegal,
    /// The tile already holds that exact kind, or was claimed earlier in the pass.
    Duplicate,
    /// The world refused the submission.
    Rejected(SubmitError),
}

/// Outcome of validating (and possibly submitting) one task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Skipped(SkipReason),
}

/// Decide whether `task` may be submitted for `territory` at `tier`.
///
/// Pure: reads the world, never writes it. `claimed` holds tiles that
/// received an order earlier in the same pass.
pub fn validate<W: WorldView + ?Sized>(
    world: &W,
    territory: &TerritoryId,
    tier: u8,
    census: &StructureCensus,
    claimed: &FxHashSet<TileCoord>,
    task: &Task,
) -> Verdict {
    if task.territory != *territory {
        return Verdict::Skipped(SkipReason::OtherTerritory);
    }
    if let Some(missing) = unmet_dependency(task, census) {
        return Verdict::Skipped(SkipReason::DependencyUnmet(missing));
    }
    if !capacity(tier, task.kind).allows(census.committed(task.kind)) {
        return Verdict::Skipped(SkipReason::CapacityReached);
    }
    if claimed.contains(&task.position) {
        return Verdict::Skipped(SkipReason::Duplicate);
    }
    if !placeable(world, territory, task.position, task.kind) {
        return Verdict::Skipped(SkipReason::Illegal);
    }
    if holds_same_kind(world, territory, task.position, task.kind) {
        return Verdict::Skipped(SkipReason::Duplicate);
    }
    Verdict::Accepted
}

// ---------------------------------------------------------------------------
// Pass report
// ---------------------------------------------------------------------------

/// How a pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// The backlog was walked (possibly placing nothing).
    Ran,
    /// The territory has no owned controller.
    NoAuthority,
    /// The plan holds no tasks.
    EmptyBacklog,
    /// The global order ceiling leaves no room.
    NoHeadroom,
}

/// The verdict reached for one visited task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub priority: PriorityTier,
    pub position: TileCoord,
    pub kind: StructureType,
    pub verdict: Verdict,
}

/// An order accepted by the world during the pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedOrder {
    pub position: TileCoord,
    pub kind: StructureType,
    pub reason: String,
}

/// Everything a single pass did. Tasks after the budget ran out are not
/// visited and have no decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassReport {
    pub territory: TerritoryId,
    pub outcome: PassOutcome,
    /// Global headroom the pass started with. 0 when `schedule_territory`
    /// stopped before reading the ledger.
    pub headroom: u32,
    /// Local budget for the pass (0 unless the pass ran).
    pub budget: u32,
    pub decisions: Vec<Decision>,
    pub placed: Vec<PlacedOrder>,
}

impl PassReport {
    fn idle(territory: &TerritoryId, outcome: PassOutcome, headroom: u32) -> Self {
        Self {
            territory: territory.clone(),
            outcome,
            headroom,
            budget: 0,
            decisions: Vec::new(),
            placed: Vec::new(),
        }
    }

    pub fn placed_count(&self) -> u32 {
        self.placed.len() as u32
    }

    /// Budget left over when the walk ended.
    pub fn unspent_budget(&self) -> u32 {
        self.budget.saturating_sub(self.placed_count())
    }

    /// Decisions that skipped their task, with the reason.
    pub fn skipped(&self) -> impl Iterator<Item = (&Decision, SkipReason)> + '_ {
        self.decisions.iter().filter_map(|d| match d.verdict {
            Verdict::Skipped(reason) => Some((d, reason)),
            Verdict::Accepted => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Scheduling pass
// ---------------------------------------------------------------------------

/// The development tier of `territory` if a pass may run at all: it needs an
/// owned controller and a non-empty plan.
fn eligible_tier<W: WorldView + ?Sized>(
    world: &W,
    plan: &Plan,
    territory: &TerritoryId,
) -> Result<u8, PassOutcome> {
    let controller = world
        .controller(territory)
        .filter(|c| c.owned)
        .ok_or(PassOutcome::NoAuthority)?;
    if plan.is_empty() {
        return Err(PassOutcome::EmptyBacklog);
    }
    Ok(controller.tier)
}

/// Run one pass for `territory`, reading the global headroom from the world
/// once the territory is known to be eligible.
pub fn schedule_territory<W: WorldView + OrderSink + ?Sized>(
    world: &mut W,
    plan: &Plan,
    territory: &TerritoryId,
    config: &SchedulerConfig,
) -> PassReport {
    if let Err(outcome) = eligible_tier(&*world, plan, territory) {
        return PassReport::idle(territory, outcome, 0);
    }
    let headroom = budget::remaining_global(config, world.global_outstanding_orders());
    schedule_territory_with_headroom(world, plan, territory, headroom, config)
}

/// Run one pass for `territory` with an explicit global headroom. The pass
/// never places more than `headroom` orders.
pub fn schedule_territory_with_headroom<W: WorldView + OrderSink + ?Sized>(
    world: &mut W,
    plan: &Plan,
    territory: &TerritoryId,
    headroom: u32,
    config: &SchedulerConfig,
) -> PassReport {
    let tier = match eligible_tier(&*world, plan, territory) {
        Ok(tier) => tier,
        Err(outcome) => return PassReport::idle(territory, outcome, headroom),
    };
    if headroom == 0 {
        return PassReport::idle(territory, PassOutcome::NoHeadroom, headroom);
    }

    let signals = TerritorySignals::observe(&*world, territory, tier);
    let budget = budget::budget(&signals, headroom, &config.budget);

    let mut census = StructureCensus::take(&*world, territory);
    let mut claimed: FxHashSet<TileCoord> = FxHashSet::default();
    let mut remaining = budget;
    let mut decisions = Vec::new();
    let mut placed = Vec::new();

    for (priority, task) in plan.ordered() {
        if remaining == 0 {
            break;
        }

        let verdict = match validate(&*world, territory, tier, &census, &claimed, task) {
            Verdict::Accepted => match world.submit_order(territory, task.position, task.kind) {
                Ok(()) => {
                    remaining -= 1;
                    census.record_order(task.kind);
                    claimed.insert(task.position);
                    log::info!(
                        "[{territory}] ordered {} at {}: {}",
                        task.kind,
                        task.position,
                        task.reason
                    );
                    placed.push(PlacedOrder {
                        position: task.position,
                        kind: task.kind,
                        reason: task.reason.clone(),
                    });
                    Verdict::Accepted
                }
                Err(err) => Verdict::Skipped(SkipReason::Rejected(err)),
            },
            skipped => skipped,
        };

        if let Verdict::Skipped(reason) = verdict {
            log::trace!(
                "[{territory}] skipped {} at {}: {reason:?}",
                task.kind,
                task.position
            );
        }

        decisions.push(Decision {
            priority,
            position: task.position,
            kind: task.kind,
            verdict,
        });
    }

    PassReport {
        territory: territory.clone(),
        outcome: PassOutcome::Ran,
        headroom,
        budget,
        decisions,
        placed,
    }
}
