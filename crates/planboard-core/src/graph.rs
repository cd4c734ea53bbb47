//! Dependency graph accessors and authoring.
//!
//! The `dependencies` list on each work item is the single source of truth
//! for the graph; successor queries are derived from it. Read-side
//! functions are tolerant: ids that resolve to nothing are skipped
//! silently. Write-side functions keep the graph well-formed and reject
//! edges that would create a cycle.

use crate::error::GraphError;
use crate::model::WorkItem;

/// Resolved predecessors of `item`, skipping unresolvable ids.
pub fn predecessors<'a>(item: &WorkItem, all_items: &'a [WorkItem]) -> Vec<&'a WorkItem> {
    item.dependencies
        .iter()
        .filter_map(|id| all_items.iter().find(|other| &other.id == id))
        .collect()
}

/// Items that depend on `item`, derived from their dependency lists.
pub fn successors<'a>(item: &WorkItem, all_items: &'a [WorkItem]) -> Vec<&'a WorkItem> {
    all_items
        .iter()
        .filter(|other| other.dependencies.iter().any(|id| id == &item.id))
        .collect()
}

/// Whether `item` starts before an unacknowledged predecessor ends.
///
/// Only scheduled items conflict; unresolvable or unscheduled predecessors
/// never do.
pub fn check_dependency_conflict(item: &WorkItem, all_items: &[WorkItem]) -> bool {
    !conflicting_predecessors(item, all_items).is_empty()
}

/// Names of the unacknowledged predecessors `item` overtakes, for display.
pub fn conflicting_predecessor_names(item: &WorkItem, all_items: &[WorkItem]) -> Vec<String> {
    conflicting_predecessors(item, all_items)
        .into_iter()
        .map(|predecessor| predecessor.name.clone())
        .collect()
}

fn conflicting_predecessors<'a>(item: &WorkItem, all_items: &'a [WorkItem]) -> Vec<&'a WorkItem> {
    let Some((item_start, _)) = item.schedule() else {
        return Vec::new();
    };

    item.dependencies
        .iter()
        .filter(|id| !item.is_acknowledged(id))
        .filter_map(|id| all_items.iter().find(|other| &other.id == id))
        .filter(|predecessor| {
            predecessor
                .schedule()
                .is_some_and(|(_, predecessor_end)| item_start < predecessor_end)
        })
        .collect()
}

/// Whether making `predecessor_id` a dependency of `item_id` would close a
/// cycle, i.e. whether `item_id` is already reachable from `predecessor_id`
/// along dependency edges.
pub fn would_create_cycle(all_items: &[WorkItem], item_id: &str, predecessor_id: &str) -> bool {
    let mut stack = vec![predecessor_id];
    let mut visited = Vec::new();

    while let Some(current) = stack.pop() {
        if current == item_id {
            return true;
        }
        if visited.contains(&current) {
            continue;
        }
        visited.push(current);
        if let Some(item) = all_items.iter().find(|item| item.id == current) {
            stack.extend(item.dependencies.iter().map(String::as_str));
        }
    }
    false
}

fn find_mut<'a>(all_items: &'a mut [WorkItem], id: &str) -> Result<&'a mut WorkItem, GraphError> {
    all_items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| GraphError::UnknownItem(id.to_string()))
}

/// Record `predecessor_id` as a dependency of `item_id`.
///
/// # Errors
/// Rejects unknown ids, self-dependencies, duplicate edges, and edges that
/// would create a cycle.
pub fn add_dependency(
    all_items: &mut [WorkItem],
    item_id: &str,
    predecessor_id: &str,
) -> Result<(), GraphError> {
    if item_id == predecessor_id {
        return Err(GraphError::SelfDependency(item_id.to_string()));
    }
    if !all_items.iter().any(|item| item.id == predecessor_id) {
        return Err(GraphError::UnknownItem(predecessor_id.to_string()));
    }
    if would_create_cycle(all_items, item_id, predecessor_id) {
        return Err(GraphError::WouldCreateCycle {
            item: item_id.to_string(),
            predecessor: predecessor_id.to_string(),
        });
    }

    let item = find_mut(all_items, item_id)?;
    if item.dependencies.iter().any(|id| id == predecessor_id) {
        return Err(GraphError::DuplicateDependency {
            item: item_id.to_string(),
            predecessor: predecessor_id.to_string(),
        });
    }
    item.dependencies.push(predecessor_id.to_string());
    Ok(())
}

/// Remove `predecessor_id` from `item_id`'s dependencies, along with any
/// acknowledgement of it.
///
/// # Errors
/// Rejects unknown items and edges that do not exist.
pub fn remove_dependency(
    all_items: &mut [WorkItem],
    item_id: &str,
    predecessor_id: &str,
) -> Result<(), GraphError> {
    let item = find_mut(all_items, item_id)?;
    let before = item.dependencies.len();
    item.dependencies.retain(|id| id != predecessor_id);
    if item.dependencies.len() == before {
        return Err(GraphError::NotADependency {
            item: item_id.to_string(),
            predecessor: predecessor_id.to_string(),
        });
    }
    item.acknowledged_dependencies.retain(|id| id != predecessor_id);
    Ok(())
}

/// Suppress the ordering conflict with `predecessor_id` for `item_id`.
///
/// Sticky until removed: the predecessor stops contributing to this item's
/// conflict list even while the overlap persists.
///
/// # Errors
/// The id must be a current dependency of the item.
pub fn acknowledge_dependency(
    all_items: &mut [WorkItem],
    item_id: &str,
    predecessor_id: &str,
) -> Result<(), GraphError> {
    let item = find_mut(all_items, item_id)?;
    if !item.dependencies.iter().any(|id| id == predecessor_id) {
        return Err(GraphError::NotADependency {
            item: item_id.to_string(),
            predecessor: predecessor_id.to_string(),
        });
    }
    if !item.is_acknowledged(predecessor_id) {
        item.acknowledged_dependencies.push(predecessor_id.to_string());
    }
    Ok(())
}

/// Undo [`acknowledge_dependency`], restoring conflict reporting.
pub fn unacknowledge_dependency(
    all_items: &mut [WorkItem],
    item_id: &str,
    predecessor_id: &str,
) -> Result<(), GraphError> {
    let item = find_mut(all_items, item_id)?;
    let before = item.acknowledged_dependencies.len();
    item.acknowledged_dependencies.retain(|id| id != predecessor_id);
    if item.acknowledged_dependencies.len() == before {
        return Err(GraphError::NotAcknowledged {
            item: item_id.to_string(),
            predecessor: predecessor_id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> WorkItem {
        WorkItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            project_id: "proj-1".to_string(),
            pdt_team_id: "pdt-1".to_string(),
            start_date: start,
            end_date: end,
            duration_weeks: 1,
            capacity: 50.0,
            completed_percentage: 0.0,
            dependencies: vec![],
            acknowledged_dependencies: vec![],
        }
    }

    fn scheduled(id: &str, start: NaiveDate, end: NaiveDate) -> WorkItem {
        item(id, Some(start), Some(end))
    }

    #[test]
    fn successors_are_derived_from_dependencies() {
        let mut a = scheduled("a", date(2025, 3, 3), date(2025, 3, 7));
        let b = scheduled("b", date(2025, 3, 10), date(2025, 3, 14));
        a.dependencies = vec!["b".to_string()];
        let items = vec![a, b];

        let preds = predecessors(&items[0], &items);
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].id, "b");

        let succs = successors(&items[1], &items);
        assert_eq!(succs.len(), 1);
        assert_eq!(succs[0].id, "a");
    }

    #[test]
    fn conflict_when_item_starts_before_predecessor_ends() {
        // X starts 3 days before Y ends.
        let mut x = scheduled("x", date(2025, 3, 11), date(2025, 3, 21));
        let y = scheduled("y", date(2025, 3, 3), date(2025, 3, 14));
        x.dependencies = vec!["y".to_string()];
        let items = vec![x, y];

        assert!(check_dependency_conflict(&items[0], &items));
        assert_eq!(
            conflicting_predecessor_names(&items[0], &items),
            vec!["Item y".to_string()]
        );
    }

    #[test]
    fn acknowledging_suppresses_exactly_that_predecessor() {
        let mut x = scheduled("x", date(2025, 3, 11), date(2025, 3, 21));
        let y = scheduled("y", date(2025, 3, 3), date(2025, 3, 14));
        let z = scheduled("z", date(2025, 3, 10), date(2025, 3, 18));
        x.dependencies = vec!["y".to_string(), "z".to_string()];
        let mut items = vec![x, y, z];

        assert_eq!(conflicting_predecessor_names(&items[0], &items).len(), 2);

        acknowledge_dependency(&mut items, "x", "y").unwrap();
        let names = conflicting_predecessor_names(&items[0], &items);
        assert_eq!(names, vec!["Item z".to_string()]);

        unacknowledge_dependency(&mut items, "x", "y").unwrap();
        assert_eq!(conflicting_predecessor_names(&items[0], &items).len(), 2);
    }

    #[test]
    fn acknowledging_a_non_dependency_is_an_error() {
        let mut items = vec![
            scheduled("x", date(2025, 3, 11), date(2025, 3, 21)),
            scheduled("y", date(2025, 3, 3), date(2025, 3, 14)),
        ];
        assert!(matches!(
            acknowledge_dependency(&mut items, "x", "y"),
            Err(GraphError::NotADependency { .. })
        ));
    }

    #[test]
    fn unresolvable_dependency_ids_are_skipped() {
        let mut x = scheduled("x", date(2025, 3, 11), date(2025, 3, 21));
        x.dependencies = vec!["deleted".to_string()];
        let items = vec![x];
        assert!(!check_dependency_conflict(&items[0], &items));
        assert!(predecessors(&items[0], &items).is_empty());
    }

    #[test]
    fn backlog_predecessor_never_conflicts() {
        let mut x = scheduled("x", date(2025, 3, 11), date(2025, 3, 21));
        let y = item("y", None, None);
        x.dependencies = vec!["y".to_string()];
        let items = vec![x, y];
        assert!(!check_dependency_conflict(&items[0], &items));
    }

    #[test]
    fn add_dependency_updates_and_validates() {
        let mut items = vec![
            scheduled("a", date(2025, 3, 3), date(2025, 3, 7)),
            scheduled("b", date(2025, 3, 10), date(2025, 3, 14)),
        ];

        add_dependency(&mut items, "b", "a").unwrap();
        assert_eq!(items[1].dependencies, vec!["a".to_string()]);

        assert!(matches!(
            add_dependency(&mut items, "b", "a"),
            Err(GraphError::DuplicateDependency { .. })
        ));
        assert!(matches!(
            add_dependency(&mut items, "b", "b"),
            Err(GraphError::SelfDependency(_))
        ));
        assert!(matches!(
            add_dependency(&mut items, "b", "missing"),
            Err(GraphError::UnknownItem(_))
        ));
    }

    #[test]
    fn add_dependency_rejects_cycles() {
        let mut items = vec![
            scheduled("a", date(2025, 3, 3), date(2025, 3, 7)),
            scheduled("b", date(2025, 3, 10), date(2025, 3, 14)),
            scheduled("c", date(2025, 3, 17), date(2025, 3, 21)),
        ];
        add_dependency(&mut items, "b", "a").unwrap();
        add_dependency(&mut items, "c", "b").unwrap();

        // a -> b -> c already holds downstream; closing the loop must fail.
        assert!(matches!(
            add_dependency(&mut items, "a", "c"),
            Err(GraphError::WouldCreateCycle { .. })
        ));
    }

    #[test]
    fn remove_dependency_clears_acknowledgement() {
        let mut items = vec![
            scheduled("a", date(2025, 3, 3), date(2025, 3, 7)),
            scheduled("b", date(2025, 3, 10), date(2025, 3, 14)),
        ];
        add_dependency(&mut items, "b", "a").unwrap();
        acknowledge_dependency(&mut items, "b", "a").unwrap();

        remove_dependency(&mut items, "b", "a").unwrap();
        assert!(items[1].dependencies.is_empty());
        assert!(items[1].acknowledged_dependencies.is_empty());

        assert!(matches!(
            remove_dependency(&mut items, "b", "a"),
            Err(GraphError::NotADependency { .. })
        ));
    }
}
