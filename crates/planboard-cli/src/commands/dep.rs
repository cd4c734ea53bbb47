use std::path::PathBuf;

use clap::Subcommand;
use planboard_core::graph;

use crate::common;

#[derive(Subcommand)]
pub enum DepAction {
    /// Make PREDECESSOR a dependency of ITEM
    Add {
        /// Dependent work item id
        item: String,
        /// Predecessor work item id
        predecessor: String,
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
    },
    /// Remove a dependency edge
    Remove {
        /// Dependent work item id
        item: String,
        /// Predecessor work item id
        predecessor: String,
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
    },
    /// Acknowledge (suppress) an ordering conflict
    Ack {
        /// Dependent work item id
        item: String,
        /// Predecessor work item id
        predecessor: String,
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
    },
    /// Withdraw an acknowledgement
    Unack {
        /// Dependent work item id
        item: String,
        /// Predecessor work item id
        predecessor: String,
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
    },
}

pub fn run(action: DepAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DepAction::Add { item, predecessor, file } => {
            let (mut plan, path) = common::load_plan(file)?;
            graph::add_dependency(&mut plan.work_items, &item, &predecessor)?;
            plan.save(&path)?;
            println!("{item} now depends on {predecessor}");
        }
        DepAction::Remove { item, predecessor, file } => {
            let (mut plan, path) = common::load_plan(file)?;
            graph::remove_dependency(&mut plan.work_items, &item, &predecessor)?;
            plan.save(&path)?;
            println!("{item} no longer depends on {predecessor}");
        }
        DepAction::Ack { item, predecessor, file } => {
            let (mut plan, path) = common::load_plan(file)?;
            graph::acknowledge_dependency(&mut plan.work_items, &item, &predecessor)?;
            plan.save(&path)?;
            println!("acknowledged {predecessor} for {item}");
        }
        DepAction::Unack { item, predecessor, file } => {
            let (mut plan, path) = common::load_plan(file)?;
            graph::unacknowledge_dependency(&mut plan.work_items, &item, &predecessor)?;
            plan.save(&path)?;
            println!("withdrew acknowledgement of {predecessor} for {item}");
        }
    }
    Ok(())
}
