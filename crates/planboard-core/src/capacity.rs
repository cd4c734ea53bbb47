//! Per-team weekly capacity aggregation.
//!
//! A work item's capacity draw is pro-rated by how many weekdays of the
//! Monday-Friday work week it actually covers: an item overlapping 3 of the
//! 5 workdays contributes `capacity / 5 * 3`. Weekend-only overlap
//! contributes nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{date_from_week_index, work_week_range};
use crate::model::WorkItem;

/// Aggregated capacity usage for one team in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityData {
    pub pdt_team_id: String,
    pub week_index: i64,
    /// Sum of pro-rated capacity percentages.
    pub capacity_used: f64,
}

impl CapacityData {
    /// Usage as a percentage of `max_capacity` (100.0 = exactly at the
    /// team's ceiling).
    pub fn utilization(&self, max_capacity: f64) -> f64 {
        if max_capacity <= 0.0 {
            return 0.0;
        }
        self.capacity_used / max_capacity * 100.0
    }
}

/// One work item's share of a week's capacity usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityEntry {
    pub work_item_id: String,
    pub work_item_name: String,
    /// Item capacity percentage (the full-week draw).
    pub capacity: f64,
    /// Weekdays of overlap with the work week, 0-5.
    pub work_days: u8,
    /// Pro-rated contribution, `capacity / 5 * work_days`.
    pub contribution: f64,
}

impl CapacityEntry {
    /// Human-readable derivation for drill-down display.
    pub fn formula(&self) -> String {
        format!(
            "{}% / 5 x {} workdays = {:.1}%",
            self.capacity, self.work_days, self.contribution
        )
    }
}

/// Itemized capacity computation for one team/week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityBreakdown {
    pub pdt_team_id: String,
    pub week_index: i64,
    pub entries: Vec<CapacityEntry>,
    pub capacity_used: f64,
}

/// Weekdays of overlap between a scheduled item and the Mon-Fri window.
///
/// The window is entirely within Mon-Fri, so every day of the clipped
/// intersection is a workday. Clamped to 0..=5.
fn work_days_in_overlap(
    start: NaiveDate,
    end: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> u8 {
    let from = start.max(window_start);
    let to = end.min(window_end);
    ((to - from).num_days() + 1).clamp(0, 5) as u8
}

fn entries_for_week(
    pdt_team_id: &str,
    week_index: i64,
    work_items: &[WorkItem],
    base_date: NaiveDate,
) -> Vec<CapacityEntry> {
    let week_monday = date_from_week_index(week_index, base_date);
    let (window_start, window_end) = work_week_range(week_monday);

    work_items
        .iter()
        .filter(|item| item.pdt_team_id == pdt_team_id)
        .filter_map(|item| {
            let (start, end) = item.schedule()?;
            if start > window_end || end < window_start {
                return None;
            }
            let work_days = work_days_in_overlap(start, end, window_start, window_end);
            Some(CapacityEntry {
                work_item_id: item.id.clone(),
                work_item_name: item.name.clone(),
                capacity: item.capacity,
                work_days,
                contribution: item.capacity / 5.0 * f64::from(work_days),
            })
        })
        .collect()
}

/// Total pro-rated capacity a team has committed in the given week.
///
/// The week window is `week_index` Monday-aligned weeks after `base_date`'s
/// week. Pure function of its inputs.
pub fn capacity_for_week(
    pdt_team_id: &str,
    week_index: i64,
    work_items: &[WorkItem],
    base_date: NaiveDate,
) -> CapacityData {
    let capacity_used = entries_for_week(pdt_team_id, week_index, work_items, base_date)
        .iter()
        .map(|entry| entry.contribution)
        .sum();

    CapacityData {
        pdt_team_id: pdt_team_id.to_string(),
        week_index,
        capacity_used,
    }
}

/// The same computation as [`capacity_for_week`], itemized per contributing
/// work item for drill-down display.
pub fn capacity_breakdown(
    pdt_team_id: &str,
    week_index: i64,
    work_items: &[WorkItem],
    base_date: NaiveDate,
) -> CapacityBreakdown {
    let entries = entries_for_week(pdt_team_id, week_index, work_items, base_date);
    let capacity_used = entries.iter().map(|entry| entry.contribution).sum();

    CapacityBreakdown {
        pdt_team_id: pdt_team_id.to_string(),
        week_index,
        entries,
        capacity_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: &str, team: &str, start: NaiveDate, end: NaiveDate, capacity: f64) -> WorkItem {
        WorkItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            project_id: "proj-1".to_string(),
            pdt_team_id: team.to_string(),
            start_date: Some(start),
            end_date: Some(end),
            duration_weeks: 1,
            capacity,
            completed_percentage: 0.0,
            dependencies: vec![],
            acknowledged_dependencies: vec![],
        }
    }

    // 2025-03-03 is a Monday.
    const BASE: (i32, u32, u32) = (2025, 3, 3);

    fn base() -> NaiveDate {
        date(BASE.0, BASE.1, BASE.2)
    }

    #[test]
    fn full_week_overlap_contributes_full_capacity() {
        let items = vec![item("a", "pdt-1", date(2025, 3, 3), date(2025, 3, 7), 60.0)];
        let data = capacity_for_week("pdt-1", 0, &items, base());
        assert_eq!(data.capacity_used, 60.0);
    }

    #[test]
    fn partial_week_is_prorated_by_workdays() {
        // Wednesday through Friday: 3 workdays.
        let items = vec![item("a", "pdt-1", date(2025, 3, 5), date(2025, 3, 7), 50.0)];
        let data = capacity_for_week("pdt-1", 0, &items, base());
        assert_eq!(data.capacity_used, 50.0 / 5.0 * 3.0);
    }

    #[test]
    fn friday_to_monday_counts_one_workday_per_week() {
        // Spans a weekend: Friday in week 0, Monday in week 1, weekend days
        // contribute nothing to either.
        let items = vec![item("a", "pdt-1", date(2025, 3, 7), date(2025, 3, 10), 50.0)];

        let week0 = capacity_for_week("pdt-1", 0, &items, base());
        assert_eq!(week0.capacity_used, 50.0 / 5.0);

        let week1 = capacity_for_week("pdt-1", 1, &items, base());
        assert_eq!(week1.capacity_used, 50.0 / 5.0);
    }

    #[test]
    fn weekend_only_overlap_contributes_nothing() {
        // Saturday-Sunday item never intersects the Mon-Fri window.
        let items = vec![item("a", "pdt-1", date(2025, 3, 8), date(2025, 3, 9), 50.0)];
        let data = capacity_for_week("pdt-1", 0, &items, base());
        assert_eq!(data.capacity_used, 0.0);
    }

    #[test]
    fn sums_across_items_of_the_same_team() {
        let items = vec![
            item("a", "pdt-1", date(2025, 3, 3), date(2025, 3, 14), 60.0),
            item("b", "pdt-1", date(2025, 3, 3), date(2025, 3, 7), 60.0),
            item("c", "pdt-2", date(2025, 3, 3), date(2025, 3, 7), 40.0),
        ];
        let data = capacity_for_week("pdt-1", 0, &items, base());
        assert_eq!(data.capacity_used, 120.0);
    }

    #[test]
    fn backlog_items_are_ignored() {
        let mut backlog = item("a", "pdt-1", date(2025, 3, 3), date(2025, 3, 7), 60.0);
        backlog.start_date = None;
        backlog.end_date = None;
        let data = capacity_for_week("pdt-1", 0, &[backlog], base());
        assert_eq!(data.capacity_used, 0.0);
    }

    #[test]
    fn week_window_follows_the_base_week_not_the_base_day() {
        // Base is a Thursday; week 0 still covers that week's Mon-Fri.
        let thursday_base = date(2025, 3, 6);
        let items = vec![item("a", "pdt-1", date(2025, 3, 3), date(2025, 3, 4), 50.0)];
        let data = capacity_for_week("pdt-1", 0, &items, thursday_base);
        assert_eq!(data.capacity_used, 50.0 / 5.0 * 2.0);
    }

    #[test]
    fn negative_week_index_looks_back() {
        let items = vec![item("a", "pdt-1", date(2025, 2, 24), date(2025, 2, 28), 50.0)];
        let data = capacity_for_week("pdt-1", -1, &items, base());
        assert_eq!(data.capacity_used, 50.0);
    }

    #[test]
    fn breakdown_matches_the_aggregate() {
        let items = vec![
            item("a", "pdt-1", date(2025, 3, 3), date(2025, 3, 14), 60.0),
            item("b", "pdt-1", date(2025, 3, 6), date(2025, 3, 7), 40.0),
        ];
        let breakdown = capacity_breakdown("pdt-1", 0, &items, base());
        assert_eq!(breakdown.entries.len(), 2);
        assert_eq!(breakdown.entries[0].work_days, 5);
        assert_eq!(breakdown.entries[1].work_days, 2);
        assert_eq!(breakdown.entries[1].contribution, 40.0 / 5.0 * 2.0);

        let aggregate = capacity_for_week("pdt-1", 0, &items, base());
        assert_eq!(breakdown.capacity_used, aggregate.capacity_used);
    }

    #[test]
    fn entry_formula_is_printable() {
        let entry = CapacityEntry {
            work_item_id: "a".to_string(),
            work_item_name: "Item a".to_string(),
            capacity: 60.0,
            work_days: 3,
            contribution: 36.0,
        };
        assert_eq!(entry.formula(), "60% / 5 x 3 workdays = 36.0%");
    }

    #[test]
    fn utilization_is_relative_to_max_capacity() {
        let data = CapacityData {
            pdt_team_id: "pdt-1".to_string(),
            week_index: 0,
            capacity_used: 120.0,
        };
        assert_eq!(data.utilization(80.0), 150.0);
        assert_eq!(data.utilization(0.0), 0.0);
    }

    proptest::proptest! {
        // A single item can never contribute less than nothing or more
        // than its full-week draw, wherever its dates land.
        #[test]
        fn contribution_is_bounded(
            start_offset in -100i64..100,
            length_days in 0i64..60,
            week_index in -10i64..20,
            capacity in 0.0f64..200.0,
        ) {
            use chrono::Duration;
            let start = base() + Duration::days(start_offset);
            let end = start + Duration::days(length_days);
            let items = vec![item("a", "pdt-1", start, end, capacity)];
            let data = capacity_for_week("pdt-1", week_index, &items, base());
            proptest::prop_assert!(data.capacity_used >= 0.0);
            proptest::prop_assert!(data.capacity_used <= capacity);
        }
    }
}
