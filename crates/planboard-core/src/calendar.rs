//! Week calendar arithmetic.
//!
//! All positioning in the engine happens against a zero-based week index
//! relative to a caller-chosen base date. Indexing is Monday-aligned:
//! every day of a week maps to the same index as that week's Monday, and
//! dates before the base produce negative indices (meaningful, never
//! clamped). Capacity math uses a separate Monday-Friday "work week"
//! window; weekends never contribute capacity.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One display week of the calendar grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekInfo {
    pub index: usize,
    /// Monday.
    pub start: NaiveDate,
    /// Sunday.
    pub end: NaiveDate,
    /// Display label, `W<n>`.
    pub label: String,
}

/// Monday of `date`'s week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Monday and Sunday of `date`'s week.
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = week_start(date);
    (start, start + Duration::days(6))
}

/// Signed number of Monday-aligned week boundaries between `base`'s week
/// and `date`'s week.
///
/// Computed week-start to week-start, so any day within a week maps to the
/// same index as that week's Monday.
pub fn week_index(date: NaiveDate, base: NaiveDate) -> i64 {
    (week_start(date) - week_start(base)).num_days() / 7
}

/// Fraction of the week elapsed at `date`, in `[0, 1)`.
///
/// Used for sub-week horizontal positioning.
pub fn week_offset(date: NaiveDate) -> f64 {
    f64::from(date.weekday().num_days_from_monday()) / 7.0
}

/// The Monday-Friday window of `date`'s week, used for capacity math.
pub fn work_week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = week_start(date);
    (start, start + Duration::days(4))
}

/// Fraction of the work week (Mon-Fri) elapsed at `date`, clamped to
/// `[0, 1]` so weekend dates pin to the end of the band.
pub fn work_week_offset(date: NaiveDate) -> f64 {
    (f64::from(date.weekday().num_days_from_monday()) / 5.0).clamp(0.0, 1.0)
}

/// Monday of the week `week_index` weeks after `base`'s week.
pub fn date_from_week_index(week_index: i64, base: NaiveDate) -> NaiveDate {
    week_start(base) + Duration::weeks(week_index)
}

/// Display week number within `date`'s year.
///
/// `ceil((day_of_year + jan1_weekday) / 7)` with a zero-based day of year
/// and Sunday-zero weekday. This is a display convenience, not strict ISO
/// 8601 numbering.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .expect("January 1 exists for every year");
    (date.ordinal0() + jan1.weekday().num_days_from_sunday()).div_ceil(7)
}

/// The 52 display weeks of `year`, starting at the first Monday on or
/// after January 1.
///
/// Intentionally emits exactly 52 weeks; the trailing days of a 53-ISO-week
/// year fall outside the grid.
pub fn all_weeks_in_year(year: i32) -> Vec<WeekInfo> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .expect("January 1 exists for every year");
    let days_until_monday = (7 - jan1.weekday().num_days_from_monday()) % 7;
    let first_monday = jan1 + Duration::days(i64::from(days_until_monday));

    (0..52)
        .map(|index| {
            let start = first_monday + Duration::weeks(index as i64);
            WeekInfo {
                index,
                start,
                end: start + Duration::days(6),
                label: format!("W{}", week_number(start)),
            }
        })
        .collect()
}

/// A sliding window of weeks centered on `center`'s week.
///
/// Indices run from 0 (`weeks_before` weeks back) through
/// `weeks_before + weeks_after`; the center week sits at `weeks_before`.
pub fn weeks_around_date(
    center: NaiveDate,
    weeks_before: usize,
    weeks_after: usize,
) -> Vec<WeekInfo> {
    (0..=weeks_before + weeks_after)
        .map(|index| {
            let offset = index as i64 - weeks_before as i64;
            let start = week_start(center) + Duration::weeks(offset);
            WeekInfo {
                index,
                start,
                end: start + Duration::days(6),
                label: format!("W{}", week_number(start)),
            }
        })
        .collect()
}

/// `"Jan 5, 2026"` style display formatting.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `"Jan 5, 2026 - Jan 11, 2026"` style range formatting.
pub fn format_week_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}
