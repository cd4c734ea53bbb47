//! Core entity types: projects, PDT teams, and work items.
//!
//! These are plain data owned by the caller. The engine never mutates them
//! except through the graph authoring functions in [`crate::graph`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A project grouping related work items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Higher priority sorts more prominently.
    pub priority: i32,
    /// Display color (hex string), not interpreted by the engine.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// A delivery team with a weekly capacity ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdtTeam {
    pub id: String,
    pub name: String,
    /// Maximum weekly capacity as a percentage of one FTE pool (e.g. 80.0).
    pub max_capacity: f64,
    pub color: String,
}

/// A schedulable unit of work.
///
/// An item is *scheduled* when both dates are present, and in the backlog
/// when both are absent. One-sided date pairs are rejected at plan load
/// (see [`crate::plan::Plan::validate`]); the accessors here treat a
/// half-set pair as unscheduled rather than guessing.
///
/// `dependencies` is the single source of truth for the dependency graph;
/// successors are derived by [`crate::graph::successors`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub pdt_team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Nominal duration in weeks. Informational only; the actual span is
    /// derived from the date pair.
    #[serde(default)]
    pub duration_weeks: u32,
    /// Percentage of the team's FTE pool consumed while active (e.g. 50.0).
    pub capacity: f64,
    /// Completion, 0-100.
    #[serde(default)]
    pub completed_percentage: f64,
    /// Ids of predecessor work items.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Predecessor ids whose ordering conflict the user has suppressed.
    /// Invariant: subset of `dependencies`.
    #[serde(default)]
    pub acknowledged_dependencies: Vec<String>,
}

impl WorkItem {
    /// The scheduled date range, if the item is scheduled.
    pub fn schedule(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.schedule().is_some()
    }

    /// Backlog membership is derived from date absence, not stored.
    pub fn is_in_backlog(&self) -> bool {
        !self.is_scheduled()
    }

    /// Whether `predecessor_id` is an acknowledged dependency.
    pub fn is_acknowledged(&self, predecessor_id: &str) -> bool {
        self.acknowledged_dependencies
            .iter()
            .any(|id| id == predecessor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(start: Option<NaiveDate>, end: Option<NaiveDate>) -> WorkItem {
        WorkItem {
            id: "work-1".to_string(),
            name: "Frontend Development".to_string(),
            project_id: "proj-1".to_string(),
            pdt_team_id: "pdt-1".to_string(),
            start_date: start,
            end_date: end,
            duration_weeks: 4,
            capacity: 60.0,
            completed_percentage: 25.0,
            dependencies: vec![],
            acknowledged_dependencies: vec![],
        }
    }

    #[test]
    fn schedule_requires_both_dates() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert!(item(Some(d), Some(d)).is_scheduled());
        assert!(item(Some(d), None).is_in_backlog());
        assert!(item(None, Some(d)).is_in_backlog());
        assert!(item(None, None).is_in_backlog());
    }

    #[test]
    fn work_item_serialization_uses_camel_case() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 28).unwrap();
        let json = serde_json::to_value(item(Some(start), Some(end))).unwrap();
        assert_eq!(json["projectId"], "proj-1");
        assert_eq!(json["pdtTeamId"], "pdt-1");
        assert_eq!(json["startDate"], "2025-03-03");
        assert_eq!(json["completedPercentage"], 25.0);
    }

    #[test]
    fn work_item_deserializes_with_defaults() {
        let json = r#"{
            "id": "work-9",
            "name": "Spike",
            "projectId": "proj-1",
            "pdtTeamId": "pdt-2",
            "capacity": 30
        }"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();
        assert!(item.is_in_backlog());
        assert_eq!(item.completed_percentage, 0.0);
        assert!(item.dependencies.is_empty());
    }
}
