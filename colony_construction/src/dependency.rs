// Dependency gate: are a task's prerequisite structures already built?
//
// Planners attach dependency labels to tasks (`"storage"` on a terminal,
// `"spawn"` on the first extensions). A label names a structure kind; the
// dependency holds once at least one structure of that kind is built in the
// territory. Queued orders do not count, since an order can still fail or be
// cancelled.
//
// Labels the scheduler does not recognise are treated as satisfied. A
// planner vocabulary the scheduler has not caught up with must not freeze
// construction in every territory.
//
// See also: `types.rs` for `StructureType::from_label`, `census.rs` for the
// built counts.

use crate::census::StructureCensus;
use crate::plan::Task;
use crate::types::StructureType;

/// The first declared dependency that is known and not yet built.
pub fn unmet_dependency(task: &Task, census: &StructureCensus) -> Option<StructureType> {
    task.dependencies
        .iter()
        .filter_map(|label| StructureType::from_label(label))
        .find(|&kind| census.built(kind) == 0)
}

/// Whether every declared dependency of `task` is satisfied.
pub fn satisfied(task: &Task, census: &StructureCensus) -> bool {
    unmet_dependency(task, census).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TerritoryId, TileCoord};
    use std::collections::BTreeMap;

    fn terminal_task() -> Task {
        Task::new(
            TerritoryId::from("W1N1"),
            TileCoord::new(20, 20),
            StructureType::Terminal,
            "market access",
        )
    }

    fn census_with(
        built: &[(StructureType, u32)],
        queued: &[(StructureType, u32)],
    ) -> StructureCensus {
        StructureCensus::from_counts(
            built.iter().copied().collect::<BTreeMap<_, _>>(),
            queued.iter().copied().collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn no_dependencies_is_satisfied() {
        assert!(satisfied(&terminal_task(), &StructureCensus::default()));
    }

    #[test]
    fn dependency_needs_one_built_structure() {
        let task = terminal_task().depends_on("storage");
        assert!(!satisfied(&task, &StructureCensus::default()));
        assert!(satisfied(
            &task,
            &census_with(&[(StructureType::Storage, 1)], &[])
        ));
    }

    #[test]
    fn queued_orders_do_not_satisfy() {
        let task = terminal_task().depends_on("storage");
        let census = census_with(&[], &[(StructureType::Storage, 1)]);
        assert_eq!(unmet_dependency(&task, &census), Some(StructureType::Storage));
    }

    #[test]
    fn unknown_labels_fail_open() {
        let task = terminal_task().depends_on("controller").depends_on("moat");
        assert!(satisfied(&task, &StructureCensus::default()));
    }

    #[test]
    fn reports_first_unmet_known_dependency() {
        let task = terminal_task()
            .depends_on("mystery")
            .depends_on("spawn")
            .depends_on("storage");
        let census = census_with(&[(StructureType::Spawn, 1)], &[]);
        assert_eq!(unmet_dependency(&task, &census), Some(StructureType::Storage));
    }
}
