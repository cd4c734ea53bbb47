use std::path::PathBuf;

use clap::Subcommand;
use planboard_core::calendar::{date_from_week_index, week_number, work_week_range};
use planboard_core::{capacity_breakdown, capacity_for_week, Plan};

use crate::common;

#[derive(Subcommand)]
pub enum CapacityAction {
    /// Utilization table, teams x weeks
    Table {
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
        /// Number of weeks ahead to show
        #[arg(long, default_value_t = 12)]
        weeks: u32,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Itemized contributions for one team and week
    Breakdown {
        /// Team id
        team: String,
        /// Week index relative to the reference date's week
        week_index: i64,
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CapacityAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CapacityAction::Table {
            file,
            weeks,
            now,
            json,
        } => {
            let (plan, _) = common::load_plan(file)?;
            let now = common::parse_now(now)?;

            if json {
                let mut grid = Vec::new();
                for team in &plan.pdt_teams {
                    for week in 0..i64::from(weeks) {
                        grid.push(capacity_for_week(&team.id, week, &plan.work_items, now));
                    }
                }
                println!("{}", serde_json::to_string_pretty(&grid)?);
                return Ok(());
            }

            print!("{}", render_table(&plan, now, weeks));
        }
        CapacityAction::Breakdown {
            team,
            week_index,
            file,
            now,
            json,
        } => {
            let (plan, _) = common::load_plan(file)?;
            let now = common::parse_now(now)?;
            let breakdown = capacity_breakdown(&team, week_index, &plan.work_items, now);

            if json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
                return Ok(());
            }

            let monday = date_from_week_index(week_index, now);
            let (window_start, window_end) = work_week_range(monday);
            println!(
                "{} / week {} ({} - {})",
                team,
                week_number(monday),
                window_start,
                window_end
            );
            if breakdown.entries.is_empty() {
                println!("  no scheduled work");
            }
            for entry in &breakdown.entries {
                println!("  {:<30} {}", entry.work_item_name, entry.formula());
            }
            println!("  total: {:.1}%", breakdown.capacity_used);
        }
    }
    Ok(())
}

/// ASCII utilization table. Cells show percentage of the team's max
/// capacity; `+` marks weeks over the ceiling.
fn render_table(plan: &Plan, now: chrono::NaiveDate, weeks: u32) -> String {
    let mut output = String::new();
    output.push_str("\nCapacity Utilization (% of team max, + = over capacity)\n");
    let width = 22 + 7 * weeks as usize;
    output.push_str(&"=".repeat(width));
    output.push('\n');

    output.push_str(&format!("{:<22}", "Team"));
    for week in 0..i64::from(weeks) {
        let label = format!("W{}", week_number(date_from_week_index(week, now)));
        output.push_str(&format!("{label:>7}"));
    }
    output.push('\n');
    output.push_str(&"-".repeat(width));
    output.push('\n');

    for team in &plan.pdt_teams {
        output.push_str(&format!("{:<22}", truncate(&team.name, 22)));
        for week in 0..i64::from(weeks) {
            let data = capacity_for_week(&team.id, week, &plan.work_items, now);
            let marker = if data.capacity_used > team.max_capacity {
                "+"
            } else {
                " "
            };
            let cell = format!("{:.0}%{marker}", data.utilization(team.max_capacity));
            output.push_str(&format!("{cell:>7}"));
        }
        output.push('\n');
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
