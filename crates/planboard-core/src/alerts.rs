//! Schedule inconsistency detection.
//!
//! Evaluates every work item against the delay/completion rules, the
//! dependency graph against ordering conflicts, and every team's weekly
//! capacity against its ceiling, producing one flat alert list. Generation
//! is a pure projection of its inputs: alerts are recomputed from scratch
//! on every call and carry deterministic ids so repeated runs produce an
//! identical, de-duplicable list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{date_from_week_index, week_number};
use crate::capacity::capacity_for_week;
use crate::graph::conflicting_predecessor_names;
use crate::model::{PdtTeam, WorkItem};

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Alert payload, keyed by the alert type.
///
/// Each variant carries exactly the references its type needs: item-level
/// rules point at a work item, capacity overflow points at a team/week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AlertKind {
    #[serde(rename_all = "camelCase")]
    Delay { work_item_id: String },
    #[serde(rename_all = "camelCase")]
    Dependency { work_item_id: String },
    #[serde(rename_all = "camelCase")]
    Capacity { pdt_team_id: String, week_index: i64 },
}

/// A single detected schedule inconsistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable id derived from the triggering cause, so regeneration
    /// produces the same id for the same condition.
    pub id: String,
    #[serde(flatten)]
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    pub fn alert_type(&self) -> &'static str {
        match self.kind {
            AlertKind::Delay { .. } => "delay",
            AlertKind::Dependency { .. } => "dependency",
            AlertKind::Capacity { .. } => "capacity",
        }
    }

    pub fn work_item_id(&self) -> Option<&str> {
        match &self.kind {
            AlertKind::Delay { work_item_id } | AlertKind::Dependency { work_item_id } => {
                Some(work_item_id)
            }
            AlertKind::Capacity { .. } => None,
        }
    }

    pub fn pdt_team_id(&self) -> Option<&str> {
        match &self.kind {
            AlertKind::Capacity { pdt_team_id, .. } => Some(pdt_team_id),
            _ => None,
        }
    }
}

/// Progress-vs-schedule detail for one work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDelayDetails {
    pub is_delayed: bool,
    pub current_progress: f64,
    /// Expected completion given elapsed weeks, rounded, clamped 0-100.
    pub expected_progress: f64,
}

/// Slack band, in percentage points, between expected and actual progress
/// before an item counts as delayed.
const DELAY_SLACK: f64 = 20.0;

/// Expected progress and delay verdict for a work item.
///
/// Elapsed and total duration are measured in whole weeks (truncating).
/// Items spanning less than a full week have no meaningful weekly slope
/// and are never delayed; items outside their active window (`start <= now
/// <= end`) are never delayed either.
pub fn progress_delay_details(item: &WorkItem, now: NaiveDate) -> ProgressDelayDetails {
    let Some((start, end)) = item.schedule() else {
        return ProgressDelayDetails {
            is_delayed: false,
            current_progress: item.completed_percentage,
            expected_progress: 0.0,
        };
    };

    let total_weeks = (end - start).num_days() / 7;
    let elapsed_weeks = (now - start).num_days() / 7;

    let expected = if total_weeks <= 0 {
        0.0
    } else {
        (elapsed_weeks as f64 / total_weeks as f64 * 100.0).clamp(0.0, 100.0)
    };

    let active = now >= start && now <= end;
    let is_delayed =
        active && total_weeks > 0 && item.completed_percentage < expected - DELAY_SLACK;

    ProgressDelayDetails {
        is_delayed,
        current_progress: item.completed_percentage,
        expected_progress: expected.round(),
    }
}

/// Whether the item is currently behind schedule.
pub fn is_progress_delayed(item: &WorkItem, now: NaiveDate) -> bool {
    progress_delay_details(item, now).is_delayed
}

/// Detector configuration.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// How many week indices ahead of `now` the capacity overflow rule
    /// inspects.
    pub capacity_lookahead_weeks: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            capacity_lookahead_weeks: 12,
        }
    }
}

/// Rule engine producing the alert list.
pub struct AlertDetector {
    config: AlertConfig,
}

impl AlertDetector {
    /// Create a detector with default settings (12-week capacity lookahead).
    pub fn new() -> Self {
        Self {
            config: AlertConfig::default(),
        }
    }

    /// Create with custom config.
    pub fn with_config(config: AlertConfig) -> Self {
        Self { config }
    }

    /// Run every rule and return the concatenated alert list.
    ///
    /// Rule order is fixed: progress delays, dependency conflicts,
    /// premature completion (future items), backlog completion, incomplete
    /// past items, then capacity overflow per (week, team).
    pub fn generate(
        &self,
        work_items: &[WorkItem],
        pdt_teams: &[PdtTeam],
        now: NaiveDate,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for item in work_items {
            if is_progress_delayed(item, now) {
                alerts.push(Alert {
                    id: format!("delay-{}", item.id),
                    kind: AlertKind::Delay {
                        work_item_id: item.id.clone(),
                    },
                    message: format!("Work item \"{}\" is behind schedule", item.name),
                    severity: Severity::Warning,
                });
            }
        }

        for item in work_items {
            let conflicts = conflicting_predecessor_names(item, work_items);
            if !conflicts.is_empty() {
                alerts.push(Alert {
                    id: format!("dependency-{}", item.id),
                    kind: AlertKind::Dependency {
                        work_item_id: item.id.clone(),
                    },
                    message: format!(
                        "Work item \"{}\" has dependency on: {}",
                        item.name,
                        conflicts.join(", ")
                    ),
                    severity: Severity::Error,
                });
            }
        }

        for item in work_items {
            if let Some((start, _)) = item.schedule() {
                if start > now && item.completed_percentage > 0.0 {
                    alerts.push(Alert {
                        id: format!("future-completion-{}", item.id),
                        kind: AlertKind::Delay {
                            work_item_id: item.id.clone(),
                        },
                        message: format!(
                            "Future work item \"{}\" has completion percentage ({}%)",
                            item.name, item.completed_percentage
                        ),
                        severity: Severity::Warning,
                    });
                }
            }
        }

        for item in work_items {
            if item.is_in_backlog() && item.completed_percentage > 0.0 {
                alerts.push(Alert {
                    id: format!("backlog-completion-{}", item.id),
                    kind: AlertKind::Delay {
                        work_item_id: item.id.clone(),
                    },
                    message: format!(
                        "Backlog item \"{}\" has completion percentage ({}%)",
                        item.name, item.completed_percentage
                    ),
                    severity: Severity::Warning,
                });
            }
        }

        for item in work_items {
            if let Some((_, end)) = item.schedule() {
                if end < now && item.completed_percentage < 100.0 {
                    alerts.push(Alert {
                        id: format!("past-incomplete-{}", item.id),
                        kind: AlertKind::Delay {
                            work_item_id: item.id.clone(),
                        },
                        message: format!(
                            "Past work item \"{}\" is not 100% complete ({}%)",
                            item.name, item.completed_percentage
                        ),
                        severity: Severity::Error,
                    });
                }
            }
        }

        for week_index in 0..i64::from(self.config.capacity_lookahead_weeks) {
            for team in pdt_teams {
                let data = capacity_for_week(&team.id, week_index, work_items, now);
                if data.capacity_used > team.max_capacity {
                    let week_monday = date_from_week_index(week_index, now);
                    alerts.push(Alert {
                        id: format!("capacity-{}-{}", team.id, week_index),
                        kind: AlertKind::Capacity {
                            pdt_team_id: team.id.clone(),
                            week_index,
                        },
                        message: format!(
                            "{} is over capacity ({:.1}%) in week {}",
                            team.name,
                            data.utilization(team.max_capacity),
                            week_number(week_monday)
                        ),
                        severity: Severity::Error,
                    });
                }
            }
        }

        alerts
    }
}

impl Default for AlertDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to generate alerts with default settings.
pub fn generate_alerts(
    work_items: &[WorkItem],
    pdt_teams: &[PdtTeam],
    now: NaiveDate,
) -> Vec<Alert> {
    AlertDetector::new().generate(work_items, pdt_teams, now)
}
