use std::path::PathBuf;

use planboard_core::{AlertConfig, AlertDetector, Config};

use crate::common;

pub fn run(
    file: Option<PathBuf>,
    json: bool,
    now: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (plan, _) = common::load_plan(file)?;
    let now = common::parse_now(now)?;

    let detector = AlertDetector::with_config(AlertConfig {
        capacity_lookahead_weeks: Config::load_or_default().alerts.capacity_lookahead_weeks,
    });
    let alerts = detector.generate(&plan.work_items, &plan.pdt_teams, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    if alerts.is_empty() {
        println!("no alerts");
        return Ok(());
    }
    for alert in &alerts {
        println!(
            "{:<7} {:<10} {}  [{}]",
            alert.severity.as_str(),
            alert.alert_type(),
            alert.message,
            alert.id
        );
    }
    println!("{} alert(s)", alerts.len());
    Ok(())
}
