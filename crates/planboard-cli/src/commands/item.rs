use std::path::PathBuf;

use clap::Subcommand;
use planboard_core::graph::{conflicting_predecessor_names, predecessors, successors};
use planboard_core::{progress_delay_details, WorkItem};

use crate::common;

#[derive(Subcommand)]
pub enum ItemAction {
    /// Inspect a work item: schedule, progress, conflicts
    Show {
        /// Work item id
        id: String,
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new backlog item
    Add {
        /// Item name
        name: String,
        /// Project id
        #[arg(long)]
        project: String,
        /// Team id
        #[arg(long)]
        team: String,
        /// Capacity draw in percent
        #[arg(long, default_value_t = 50.0)]
        capacity: f64,
        /// Nominal duration in weeks
        #[arg(long, default_value_t = 1)]
        duration: u32,
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
    },
    /// Schedule an item onto the calendar
    Schedule {
        /// Work item id
        id: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
    },
    /// Move an item back to the backlog
    Backlog {
        /// Work item id
        id: String,
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
    },
}

pub fn run(action: ItemAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ItemAction::Show { id, file, now, json } => {
            let (plan, _) = common::load_plan(file)?;
            let now = common::parse_now(now)?;
            let item = plan
                .work_item(&id)
                .ok_or_else(|| format!("unknown work item: {id}"))?;

            let delay = progress_delay_details(item, now);
            let conflicts = conflicting_predecessor_names(item, &plan.work_items);
            let predecessor_names: Vec<&str> = predecessors(item, &plan.work_items)
                .iter()
                .map(|p| p.name.as_str())
                .collect();
            let successor_names: Vec<&str> = successors(item, &plan.work_items)
                .iter()
                .map(|s| s.name.as_str())
                .collect();

            if json {
                let value = serde_json::json!({
                    "item": item,
                    "delay": delay,
                    "conflictingPredecessors": conflicts,
                    "predecessors": predecessor_names,
                    "successors": successor_names,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("{} ({})", item.name, item.id);
            match item.schedule() {
                Some((start, end)) => println!("  scheduled: {start} - {end}"),
                None => println!("  backlog"),
            }
            println!("  team: {}  project: {}", item.pdt_team_id, item.project_id);
            println!("  capacity: {}%  completed: {}%", item.capacity, item.completed_percentage);
            println!(
                "  progress: expected {}%, {}",
                delay.expected_progress,
                if delay.is_delayed { "behind schedule" } else { "on track" }
            );
            if !predecessor_names.is_empty() {
                println!("  depends on: {}", predecessor_names.join(", "));
            }
            if !successor_names.is_empty() {
                println!("  blocks: {}", successor_names.join(", "));
            }
            if !conflicts.is_empty() {
                println!("  conflicts with: {}", conflicts.join(", "));
            }
        }
        ItemAction::Add {
            name,
            project,
            team,
            capacity,
            duration,
            file,
        } => {
            let (mut plan, path) = common::load_plan(file)?;
            let id = uuid::Uuid::new_v4().to_string();
            plan.work_items.push(WorkItem {
                id: id.clone(),
                name,
                project_id: project,
                pdt_team_id: team,
                start_date: None,
                end_date: None,
                duration_weeks: duration,
                capacity,
                completed_percentage: 0.0,
                dependencies: vec![],
                acknowledged_dependencies: vec![],
            });
            plan.validate()?;
            plan.save(&path)?;
            println!("added backlog item {id}");
        }
        ItemAction::Schedule { id, start, end, file } => {
            let (mut plan, path) = common::load_plan(file)?;
            let start = chrono::NaiveDate::parse_from_str(&start, "%Y-%m-%d")?;
            let end = chrono::NaiveDate::parse_from_str(&end, "%Y-%m-%d")?;
            let item = plan
                .work_items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or_else(|| format!("unknown work item: {id}"))?;
            item.start_date = Some(start);
            item.end_date = Some(end);
            plan.validate()?;
            plan.save(&path)?;
            println!("scheduled {id}: {start} - {end}");
        }
        ItemAction::Backlog { id, file } => {
            let (mut plan, path) = common::load_plan(file)?;
            let item = plan
                .work_items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or_else(|| format!("unknown work item: {id}"))?;
            item.start_date = None;
            item.end_date = None;
            plan.validate()?;
            plan.save(&path)?;
            println!("moved {id} to the backlog");
        }
    }
    Ok(())
}
