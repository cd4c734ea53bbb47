//! Timeline row layout.
//!
//! Packs scheduled work items into display rows so overlapping items never
//! share a row: each item joins the first row where it overlaps nothing
//! (first-fit by ascending start date). Backlog items carry no dates and
//! are excluded from row assignment.

use crate::model::WorkItem;

/// Items sorted ascending by start date, backlog items last.
///
/// Stable: ties and backlog items keep their input order.
pub fn sort_by_start_date(items: &[WorkItem]) -> Vec<&WorkItem> {
    let mut sorted: Vec<&WorkItem> = items.iter().collect();
    sorted.sort_by(|a, b| match (a.start_date, b.start_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    sorted
}

fn overlaps(a: &WorkItem, b: &WorkItem) -> bool {
    match (a.schedule(), b.schedule()) {
        (Some((a_start, a_end)), Some((b_start, b_end))) => {
            a_start <= b_end && a_end >= b_start
        }
        _ => false,
    }
}

/// First-fit row assignment for the scheduled items.
///
/// Returns rows in creation order; within a row, items are ordered by
/// start date.
pub fn layout_rows(items: &[WorkItem]) -> Vec<Vec<&WorkItem>> {
    let mut rows: Vec<Vec<&WorkItem>> = Vec::new();

    for item in sort_by_start_date(items) {
        if !item.is_scheduled() {
            continue;
        }
        match rows
            .iter_mut()
            .find(|row| row.iter().all(|existing| !overlaps(item, existing)))
        {
            Some(row) => row.push(item),
            None => rows.push(vec![item]),
        }
    }

    rows
}

/// Row assignment computed per PDT team.
///
/// Teams appear in first-seen order (by sorted item order); each team gets
/// its own independent row packing.
pub fn layout_rows_by_team<'a>(items: &'a [WorkItem]) -> Vec<(&'a str, Vec<Vec<&'a WorkItem>>)> {
    let mut team_order: Vec<&str> = Vec::new();
    for item in sort_by_start_date(items) {
        if item.is_scheduled() && !team_order.contains(&item.pdt_team_id.as_str()) {
            team_order.push(&item.pdt_team_id);
        }
    }

    team_order
        .into_iter()
        .map(|team_id| (team_id, layout_rows_filtered(items, team_id)))
        .collect()
}

fn layout_rows_filtered<'a>(items: &'a [WorkItem], team_id: &str) -> Vec<Vec<&'a WorkItem>> {
    let mut rows: Vec<Vec<&'a WorkItem>> = Vec::new();
    for item in sort_by_start_date(items) {
        if !item.is_scheduled() || item.pdt_team_id != team_id {
            continue;
        }
        match rows
            .iter_mut()
            .find(|row| row.iter().all(|existing| !overlaps(item, existing)))
        {
            Some(row) => row.push(item),
            None => rows.push(vec![item]),
        }
    }
    rows
}

/// Work items belonging to a project.
pub fn items_by_project<'a>(items: &'a [WorkItem], project_id: &str) -> Vec<&'a WorkItem> {
    items
        .iter()
        .filter(|item| item.project_id == project_id)
        .collect()
}

/// Work items assigned to a team.
pub fn items_by_team<'a>(items: &'a [WorkItem], pdt_team_id: &str) -> Vec<&'a WorkItem> {
    items
        .iter()
        .filter(|item| item.pdt_team_id == pdt_team_id)
        .collect()
}
