// The planner-owned construction backlog.
//
// A `Task` is one desired structure placement produced by the external
// planner: where, what, why, which structure kinds must already exist, and
// which territory it belongs to. A `Plan` is the backlog, partitioned into
// three priority tiers. The scheduler treats a plan as read-only for the
// duration of a pass; the planner regenerates it between ticks and is
// responsible for dropping tasks whose order or structure now exists.
//
// Within a pass the tiers are consumed strictly in `PriorityTier::ORDER`
// (critical, important, normal). Tasks of the same tier keep the planner's
// relative order; nothing is re-sorted.
//
// See also: `executor.rs` which walks `Plan::ordered()`, `dependency.rs`
// which interprets `Task::dependencies`, `types.rs` for `PriorityTier`.

use crate::types::{PriorityTier, StructureType, TerritoryId, TileCoord};
use serde::{Deserialize, Serialize};

/// A desired structure placement awaiting validation and submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub position: TileCoord,
    pub kind: StructureType,
    /// Free-text justification from the planner, echoed in the log line.
    pub reason: String,
    /// Structure-kind labels that must already be built (e.g. `"storage"`).
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub territory: TerritoryId,
}

impl Task {
    pub fn new(
        territory: TerritoryId,
        position: TileCoord,
        kind: StructureType,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            position,
            kind,
            reason: reason.into(),
            dependencies: Vec::new(),
            territory,
        }
    }

    /// Builder-style helper to declare a dependency label.
    pub fn depends_on(mut self, label: impl Into<String>) -> Self {
        self.dependencies.push(label.into());
        self
    }
}

/// The tier-partitioned backlog for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub critical: Vec<Task>,
    #[serde(default)]
    pub important: Vec<Task>,
    #[serde(default)]
    pub normal: Vec<Task>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the end of its tier.
    pub fn push(&mut self, tier: PriorityTier, task: Task) {
        self.tier_mut(tier).push(task);
    }

    /// Tasks of a single tier, in planner order.
    pub fn tier(&self, tier: PriorityTier) -> &[Task] {
        match tier {
            PriorityTier::Critical => &self.critical,
            PriorityTier::Important => &self.important,
            PriorityTier::Normal => &self.normal,
        }
    }

    fn tier_mut(&mut self, tier: PriorityTier) -> &mut Vec<Task> {
        match tier {
            PriorityTier::Critical => &mut self.critical,
            PriorityTier::Important => &mut self.important,
            PriorityTier::Normal => &mut self.normal,
        }
    }

    /// All tasks in processing order, each paired with its tier.
    pub fn ordered(&self) -> impl Iterator<Item = (PriorityTier, &Task)> + '_ {
        PriorityTier::ORDER.into_iter().flat_map(move |tier| {
            self.tier(tier).iter().map(move |task| (tier, task))
        })
    }

    pub fn len(&self) -> usize {
        self.critical.len() + self.important.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
