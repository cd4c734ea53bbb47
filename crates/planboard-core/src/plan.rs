//! Plan loading, validation, and the demonstration dataset.
//!
//! A plan is the caller-owned entity set the engine computes over. The
//! loader is strict: input that violates the data invariants (one-sided
//! date pairs, dangling references, dependency cycles) is rejected rather
//! than repaired, so every downstream computation can assume a well-formed
//! snapshot.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, ValidationError};
use crate::model::{PdtTeam, Project, WorkItem};

/// The full entity set: projects, teams, and work items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub pdt_teams: Vec<PdtTeam>,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
}

impl Plan {
    /// Read and validate a plan from a JSON file.
    ///
    /// # Errors
    /// Fails on unreadable files, malformed JSON, or invariant violations.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PlanError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let plan: Plan =
            serde_json::from_str(&content).map_err(|source| PlanError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;
        plan.validate()?;
        Ok(plan)
    }

    /// Write the plan to a JSON file (pretty-printed).
    ///
    /// # Errors
    /// Fails if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PlanError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(PlanError::Serialize)?;
        std::fs::write(path, content).map_err(|source| PlanError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&PdtTeam> {
        self.pdt_teams.iter().find(|team| team.id == id)
    }

    pub fn work_item(&self, id: &str) -> Option<&WorkItem> {
        self.work_items.iter().find(|item| item.id == id)
    }

    /// Check every data invariant, returning the first violation.
    ///
    /// Checked: unique ids, resolvable project/team references, complete
    /// and ordered date pairs, no self-dependencies, resolvable dependency
    /// ids, acknowledged ids being actual dependencies, and an acyclic
    /// dependency graph.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.check_unique_ids()?;

        for item in &self.work_items {
            if self.project(&item.project_id).is_none() {
                return Err(ValidationError::UnknownProject {
                    work_item: item.id.clone(),
                    project_id: item.project_id.clone(),
                });
            }
            if self.team(&item.pdt_team_id).is_none() {
                return Err(ValidationError::UnknownTeam {
                    work_item: item.id.clone(),
                    team_id: item.pdt_team_id.clone(),
                });
            }

            match (item.start_date, item.end_date) {
                (Some(start), Some(end)) if end < start => {
                    return Err(ValidationError::InvertedDates {
                        work_item: item.id.clone(),
                        start,
                        end,
                    });
                }
                (Some(_), None) | (None, Some(_)) => {
                    return Err(ValidationError::HalfScheduled {
                        work_item: item.id.clone(),
                    });
                }
                _ => {}
            }

            for dependency_id in &item.dependencies {
                if dependency_id == &item.id {
                    return Err(ValidationError::SelfDependency {
                        work_item: item.id.clone(),
                    });
                }
                if self.work_item(dependency_id).is_none() {
                    return Err(ValidationError::UnknownDependency {
                        work_item: item.id.clone(),
                        dependency_id: dependency_id.clone(),
                    });
                }
            }

            for acknowledged_id in &item.acknowledged_dependencies {
                if !item.dependencies.contains(acknowledged_id) {
                    return Err(ValidationError::AcknowledgedNotADependency {
                        work_item: item.id.clone(),
                        dependency_id: acknowledged_id.clone(),
                    });
                }
            }
        }

        self.check_acyclic()
    }

    fn check_unique_ids(&self) -> Result<(), ValidationError> {
        let collections: [(&str, Vec<&str>); 3] = [
            ("projects", self.projects.iter().map(|p| p.id.as_str()).collect()),
            ("pdtTeams", self.pdt_teams.iter().map(|t| t.id.as_str()).collect()),
            ("workItems", self.work_items.iter().map(|i| i.id.as_str()).collect()),
        ];
        for (collection, ids) in collections {
            let mut seen: Vec<&str> = Vec::new();
            for id in ids {
                if seen.contains(&id) {
                    return Err(ValidationError::DuplicateId {
                        collection: collection.to_string(),
                        id: id.to_string(),
                    });
                }
                seen.push(id);
            }
        }
        Ok(())
    }

    /// Depth-first cycle check over dependency edges. Unknown dependency
    /// ids are reported before this runs, so edges here always resolve.
    fn check_acyclic(&self) -> Result<(), ValidationError> {
        // 0 = unvisited, 1 = on the current path, 2 = done
        let mut state = vec![0u8; self.work_items.len()];

        fn visit(
            plan: &Plan,
            index: usize,
            state: &mut [u8],
        ) -> Result<(), ValidationError> {
            if state[index] == 1 {
                return Err(ValidationError::DependencyCycle {
                    work_item: plan.work_items[index].id.clone(),
                });
            }
            if state[index] == 2 {
                return Ok(());
            }
            state[index] = 1;
            for dependency_id in &plan.work_items[index].dependencies {
                if let Some(pos) = plan
                    .work_items
                    .iter()
                    .position(|item| &item.id == dependency_id)
                {
                    visit(plan, pos, state)?;
                }
            }
            state[index] = 2;
            Ok(())
        }

        for index in 0..self.work_items.len() {
            visit(self, index, &mut state)?;
        }
        Ok(())
    }

    /// Deterministic demonstration plan, placed relative to `now` so the
    /// full range of alert conditions is exercised: a delayed active item,
    /// a dependency ordering conflict, a team over capacity, a backlog
    /// item with spurious completion, and an unfinished past item.
    pub fn sample(now: NaiveDate) -> Self {
        let weeks = |n: i64| Duration::weeks(n);

        let projects = vec![
            Project {
                id: "proj-1".to_string(),
                name: "E-commerce Platform Redesign".to_string(),
                priority: 95,
                color: "#3b82f6".to_string(),
                start_date: Some(now - weeks(4)),
            },
            Project {
                id: "proj-2".to_string(),
                name: "Mobile App Development".to_string(),
                priority: 88,
                color: "#10b981".to_string(),
                start_date: Some(now - weeks(6)),
            },
            Project {
                id: "proj-3".to_string(),
                name: "Data Analytics Dashboard".to_string(),
                priority: 75,
                color: "#f59e0b".to_string(),
                start_date: Some(now - weeks(5)),
            },
            Project {
                id: "proj-4".to_string(),
                name: "API Gateway Migration".to_string(),
                priority: 65,
                color: "#8b5cf6".to_string(),
                start_date: Some(now - weeks(8)),
            },
        ];

        let pdt_teams = vec![
            PdtTeam {
                id: "pdt-1".to_string(),
                name: "Frontend Team".to_string(),
                max_capacity: 80.0,
                color: "#3b82f6".to_string(),
            },
            PdtTeam {
                id: "pdt-2".to_string(),
                name: "Backend Team".to_string(),
                max_capacity: 85.0,
                color: "#10b981".to_string(),
            },
            PdtTeam {
                id: "pdt-3".to_string(),
                name: "DevOps Team".to_string(),
                max_capacity: 75.0,
                color: "#f59e0b".to_string(),
            },
            PdtTeam {
                id: "pdt-4".to_string(),
                name: "QA Team".to_string(),
                max_capacity: 80.0,
                color: "#ef4444".to_string(),
            },
            PdtTeam {
                id: "pdt-5".to_string(),
                name: "Design Team".to_string(),
                max_capacity: 70.0,
                color: "#8b5cf6".to_string(),
            },
        ];

        let item = |id: &str,
                    name: &str,
                    project: &str,
                    team: &str,
                    dates: Option<(NaiveDate, NaiveDate)>,
                    duration_weeks: u32,
                    capacity: f64,
                    completed: f64,
                    dependencies: Vec<String>| WorkItem {
            id: id.to_string(),
            name: name.to_string(),
            project_id: project.to_string(),
            pdt_team_id: team.to_string(),
            start_date: dates.map(|(start, _)| start),
            end_date: dates.map(|(_, end)| end),
            duration_weeks,
            capacity,
            completed_percentage: completed,
            dependencies,
            acknowledged_dependencies: vec![],
        };

        let work_items = vec![
            item(
                "work-1",
                "UI/UX Design Phase",
                "proj-1",
                "pdt-5",
                Some((now - weeks(4), now - weeks(2))),
                2,
                40.0,
                100.0,
                vec![],
            ),
            // Halfway through with a quarter done: progress delay.
            item(
                "work-2",
                "Frontend Development",
                "proj-1",
                "pdt-1",
                Some((now - weeks(2), now + weeks(2))),
                4,
                60.0,
                25.0,
                vec!["work-1".to_string()],
            ),
            item(
                "work-3",
                "Backend API Development",
                "proj-1",
                "pdt-2",
                Some((now + weeks(1), now + weeks(5))),
                4,
                50.0,
                0.0,
                vec![],
            ),
            // Starts one week before its predecessor ends: ordering conflict.
            item(
                "work-4",
                "Integration Testing",
                "proj-1",
                "pdt-4",
                Some((now + weeks(4), now + weeks(6))),
                2,
                45.0,
                0.0,
                vec!["work-3".to_string()],
            ),
            item(
                "work-5",
                "Mobile App UI Design",
                "proj-2",
                "pdt-5",
                Some((now - weeks(1), now + weeks(1))),
                2,
                35.0,
                40.0,
                vec![],
            ),
            // Doubles up the Frontend Team with work-2: capacity overflow.
            item(
                "work-6",
                "Mobile App Development",
                "proj-2",
                "pdt-1",
                Some((now, now + weeks(4))),
                4,
                60.0,
                0.0,
                vec![],
            ),
            // Ended a week ago at 80%.
            item(
                "work-7",
                "Analytics Backend",
                "proj-3",
                "pdt-2",
                Some((now - weeks(3), now - weeks(1))),
                2,
                40.0,
                80.0,
                vec![],
            ),
            item(
                "work-8",
                "Dashboard Frontend",
                "proj-3",
                "pdt-1",
                None,
                3,
                50.0,
                0.0,
                vec![],
            ),
            // Not started for another two weeks but already 10% complete.
            item(
                "work-9",
                "Gateway Deployment",
                "proj-4",
                "pdt-3",
                Some((now + weeks(2), now + weeks(3))),
                1,
                55.0,
                10.0,
                vec![],
            ),
            item(
                "work-10",
                "Load Testing",
                "proj-4",
                "pdt-4",
                None,
                1,
                30.0,
                45.0,
                vec![],
            ),
        ];

        Plan {
            projects,
            pdt_teams,
            work_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::generate_alerts;

    fn now() -> NaiveDate {
        // A Wednesday.
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn sample_plan_is_valid() {
        let plan = Plan::sample(now());
        plan.validate().unwrap();
        assert_eq!(plan.projects.len(), 4);
        assert_eq!(plan.pdt_teams.len(), 5);
        assert_eq!(plan.work_items.len(), 10);
    }

    #[test]
    fn sample_plan_exercises_every_alert_rule() {
        let plan = Plan::sample(now());
        let alerts = generate_alerts(&plan.work_items, &plan.pdt_teams, now());
        let ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();

        assert!(ids.contains(&"delay-work-2"));
        assert!(ids.contains(&"dependency-work-4"));
        assert!(ids.contains(&"future-completion-work-9"));
        assert!(ids.contains(&"backlog-completion-work-10"));
        assert!(ids.contains(&"past-incomplete-work-7"));
        assert!(ids.iter().any(|id| id.starts_with("capacity-pdt-1-")));

        // Only the doubled-up Frontend Team overflows.
        assert!(alerts
            .iter()
            .filter(|a| a.alert_type() == "capacity")
            .all(|a| a.pdt_team_id() == Some("pdt-1")));
    }

    #[test]
    fn load_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");

        let plan = Plan::sample(now());
        plan.save(&path).unwrap();
        let loaded = Plan::load(&path).unwrap();

        assert_eq!(loaded.work_items.len(), plan.work_items.len());
        assert_eq!(
            loaded.work_item("work-2").unwrap().start_date,
            plan.work_item("work-2").unwrap().start_date
        );
    }

    #[test]
    fn load_rejects_missing_file_and_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            Plan::load(&missing),
            Err(PlanError::ReadFailed { .. })
        ));

        let garbled = dir.path().join("bad.json");
        std::fs::write(&garbled, "{not json").unwrap();
        assert!(matches!(
            Plan::load(&garbled),
            Err(PlanError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_dangling_references() {
        let mut plan = Plan::sample(now());
        plan.work_items[0].project_id = "proj-x".to_string();
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::UnknownProject { .. })
        ));

        let mut plan = Plan::sample(now());
        plan.work_items[0].pdt_team_id = "pdt-x".to_string();
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::UnknownTeam { .. })
        ));

        let mut plan = Plan::sample(now());
        plan.work_items[0].dependencies = vec!["deleted".to_string()];
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_date_pairs() {
        let mut plan = Plan::sample(now());
        plan.work_items[0].end_date = None;
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::HalfScheduled { .. })
        ));

        let mut plan = Plan::sample(now());
        let start = plan.work_items[0].start_date.unwrap();
        plan.work_items[0].end_date = Some(start - Duration::days(1));
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::InvertedDates { .. })
        ));
    }

    #[test]
    fn validate_rejects_self_dependency_and_cycles() {
        let mut plan = Plan::sample(now());
        plan.work_items[0].dependencies = vec!["work-1".to_string()];
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::SelfDependency { .. })
        ));

        let mut plan = Plan::sample(now());
        // work-2 already depends on work-1; close the loop.
        plan.work_items[0].dependencies = vec!["work-2".to_string()];
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::DependencyCycle { .. })
        ));
    }

    #[test]
    fn validate_rejects_unacknowledgeable_ids_and_duplicates() {
        let mut plan = Plan::sample(now());
        plan.work_items[0].acknowledged_dependencies = vec!["work-9".to_string()];
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::AcknowledgedNotADependency { .. })
        ));

        let mut plan = Plan::sample(now());
        let duplicate = plan.work_items[0].clone();
        plan.work_items.push(duplicate);
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::DuplicateId { .. })
        ));
    }
}
