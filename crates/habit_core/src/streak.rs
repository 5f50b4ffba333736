use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::activity::completed_count;
use crate::habit::CompletionRecord;

/// How a single habit's streak treats days with no stored entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// Walk stored entries newest first; days without an entry are skipped,
    /// so gaps never break the streak.
    #[default]
    StoredEntries,
    /// Walk consecutive calendar days back from the newest stored entry; a
    /// missing day ends the streak like a zero would.
    CalendarDays,
}

/// Streak of one habit under [`StreakPolicy::StoredEntries`].
pub fn habit_streak(record: &CompletionRecord) -> u32 {
    habit_streak_with(record, StreakPolicy::StoredEntries)
}

pub fn habit_streak_with(record: &CompletionRecord, policy: StreakPolicy) -> u32 {
    match policy {
        StreakPolicy::StoredEntries => record
            .iter()
            .rev()
            .take_while(|(_, level)| level.is_completed())
            .count() as u32,
        StreakPolicy::CalendarDays => {
            let Some(latest) = record.most_recent_day() else {
                return 0;
            };
            walk_back(latest, |day| record.level_on(day).is_completed())
        }
    }
}

/// Dashboard-wide streak: consecutive calendar days ending at `today` on
/// which at least one habit was completed. A day with nothing done, today
/// included, ends it.
pub fn current_streak(records: &[&CompletionRecord], today: NaiveDate) -> u32 {
    walk_back(today, |day| completed_count(records, day) > 0)
}

fn walk_back(start: NaiveDate, mut qualifies: impl FnMut(NaiveDate) -> bool) -> u32 {
    let mut streak = 0;
    let mut day = Some(start);
    while let Some(current) = day {
        if !qualifies(current) {
            break;
        }
        streak += 1;
        day = current.pred_opt();
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(entries: &[(NaiveDate, u8)]) -> CompletionRecord {
        entries
            .iter()
            .map(|(day, level)| (*day, Level::new(*level).unwrap()))
            .collect()
    }

    #[test]
    fn empty_record_has_no_streak() {
        assert_eq!(habit_streak(&CompletionRecord::new()), 0);
        assert_eq!(
            habit_streak_with(&CompletionRecord::new(), StreakPolicy::CalendarDays),
            0
        );
    }

    #[test]
    fn streak_stops_at_first_zero() {
        let today = date(2024, 7, 4);
        let rec = record(&[(today, 3), (date(2024, 7, 3), 0), (date(2024, 7, 2), 4)]);
        assert_eq!(habit_streak(&rec), 1);
    }

    #[test]
    fn stored_entries_skip_missing_days() {
        let rec = record(&[(date(2024, 7, 4), 2), (date(2024, 7, 2), 1)]);
        assert_eq!(habit_streak(&rec), 2);
        assert_eq!(habit_streak_with(&rec, StreakPolicy::CalendarDays), 1);
    }

    #[test]
    fn ordering_is_by_calendar_value_across_years() {
        // Spans a year boundary.
        let rec = record(&[
            (date(2024, 1, 2), 1),
            (date(2024, 1, 1), 2),
            (date(2023, 12, 31), 3),
            (date(2023, 12, 9), 0),
            (date(2023, 2, 28), 4),
        ]);
        assert_eq!(habit_streak(&rec), 3);
        assert_eq!(habit_streak_with(&rec, StreakPolicy::CalendarDays), 3);
    }

    #[test]
    fn newest_entry_zero_means_no_streak() {
        let rec = record(&[(date(2024, 7, 4), 0), (date(2024, 7, 3), 4)]);
        assert_eq!(habit_streak(&rec), 0);
    }

    #[test]
    fn current_streak_requires_contiguous_days() {
        let today = date(2024, 3, 1);
        let a = record(&[(today, 1), (date(2024, 2, 29), 0), (date(2024, 2, 26), 2)]);
        let b = record(&[(date(2024, 2, 29), 3), (date(2024, 2, 28), 1)]);
        assert_eq!(current_streak(&[&a, &b], today), 3);
        assert_eq!(current_streak(&[&a], today), 1);
    }

    #[test]
    fn current_streak_is_zero_when_today_is_empty() {
        let today = date(2024, 3, 1);
        let a = record(&[(date(2024, 2, 29), 3)]);
        assert_eq!(current_streak(&[&a], today), 0);
        assert_eq!(current_streak(&[], today), 0);
    }
}
