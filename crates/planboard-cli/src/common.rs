//! Shared helpers for CLI commands.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use planboard_core::{Config, Plan};

/// Resolve the plan file path: explicit argument, then the configured
/// default, then `./planboard.json`.
pub fn resolve_plan_path(file: Option<PathBuf>) -> PathBuf {
    if let Some(path) = file {
        return path;
    }
    if let Some(path) = Config::load_or_default().plan.path {
        return path;
    }
    PathBuf::from("planboard.json")
}

/// Load the plan from the resolved path, returning the path alongside so
/// mutating commands can write back to the same file.
pub fn load_plan(file: Option<PathBuf>) -> Result<(Plan, PathBuf), Box<dyn std::error::Error>> {
    let path = resolve_plan_path(file);
    let plan = Plan::load(&path)?;
    Ok((plan, path))
}

/// Parse a `--now` argument, defaulting to today's local date.
pub fn parse_now(now: Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match now {
        Some(value) => Ok(NaiveDate::parse_from_str(&value, "%Y-%m-%d")?),
        None => Ok(Local::now().date_naive()),
    }
}
