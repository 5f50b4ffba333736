use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::habit::CompletionRecord;
use crate::level::Level;

pub type ActivityMap = BTreeMap<NaiveDate, Level>;

/// Aggregate level for every day in `days`: the number of distinct habits
/// with a level above zero on that day, bucketed by [`Level::from_count`].
/// Per-habit intensities do not weigh into the result.
pub fn activity_levels(records: &[&CompletionRecord], days: &[NaiveDate]) -> ActivityMap {
    days.iter()
        .map(|day| (*day, Level::from_count(completed_count(records, *day))))
        .collect()
}

/// Single-habit variant: each day carries the habit's own stored level.
pub fn habit_activity_levels(record: &CompletionRecord, days: &[NaiveDate]) -> ActivityMap {
    days.iter().map(|day| (*day, record.level_on(*day))).collect()
}

pub fn completed_count(records: &[&CompletionRecord], day: NaiveDate) -> usize {
    records
        .iter()
        .filter(|record| record.level_on(day).is_completed())
        .count()
}

/// Number of (habit, day) entries with a level above zero.
pub fn total_contributions(records: &[&CompletionRecord]) -> usize {
    records.iter().map(|record| record.completed_days()).sum()
}
