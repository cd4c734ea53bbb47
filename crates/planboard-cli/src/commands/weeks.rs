use chrono::Datelike;
use planboard_core::calendar::format_week_range;
use planboard_core::{all_weeks_in_year, Config};

pub fn run(year: Option<i32>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let year = year
        .or_else(|| Config::load_or_default().calendar.year)
        .unwrap_or_else(|| chrono::Local::now().year());

    let weeks = all_weeks_in_year(year);

    if json {
        println!("{}", serde_json::to_string_pretty(&weeks)?);
        return Ok(());
    }

    println!("{year}: {} weeks", weeks.len());
    for week in &weeks {
        println!(
            "{:>3}  {:<4} {}",
            week.index,
            week.label,
            format_week_range(week.start, week.end)
        );
    }
    Ok(())
}
