use std::path::PathBuf;

use clap::Subcommand;
use planboard_core::Plan;

use crate::common;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Create a new plan file
    Init {
        /// Seed with the demonstration dataset instead of an empty plan
        #[arg(long)]
        sample: bool,
        /// Output file (defaults to the configured plan, then ./planboard.json)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Reference date for sample placement (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<String>,
    },
    /// Validate a plan file
    Validate {
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Init { sample, out, now } => {
            let path = common::resolve_plan_path(out);
            if path.exists() {
                return Err(format!("refusing to overwrite existing plan: {}", path.display()).into());
            }
            let plan = if sample {
                Plan::sample(common::parse_now(now)?)
            } else {
                Plan::default()
            };
            plan.save(&path)?;
            println!("plan written to {}", path.display());
        }
        PlanAction::Validate { file } => {
            let path = common::resolve_plan_path(file);
            let plan = Plan::load(&path)?;
            println!(
                "ok: {} projects, {} teams, {} work items",
                plan.projects.len(),
                plan.pdt_teams.len(),
                plan.work_items.len()
            );
        }
    }
    Ok(())
}
