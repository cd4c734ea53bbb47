use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "planboard-cli", version, about = "Planboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan file management
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Generate schedule alerts
    Alerts {
        /// Plan file (defaults to the configured plan, then ./planboard.json)
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<String>,
    },
    /// Team capacity queries
    Capacity {
        #[command(subcommand)]
        action: commands::capacity::CapacityAction,
    },
    /// Week calendar for a year
    Weeks {
        /// Calendar year, defaults to the configured or current year
        #[arg(long)]
        year: Option<i32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Work item queries and authoring
    Item {
        #[command(subcommand)]
        action: commands::item::ItemAction,
    },
    /// Dependency management
    Dep {
        #[command(subcommand)]
        action: commands::dep::DepAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Alerts { file, json, now } => commands::alerts::run(file, json, now),
        Commands::Capacity { action } => commands::capacity::run(action),
        Commands::Weeks { year, json } => commands::weeks::run(year, json),
        Commands::Item { action } => commands::item::run(action),
        Commands::Dep { action } => commands::dep::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
