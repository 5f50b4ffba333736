use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Two-letter weekday labels for the rows of a Sunday-first week column.
pub const DAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Which days a contribution graph covers. Both modes end no later than the
/// `today` they are resolved against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DayRange {
    Trailing { days: u32 },
    Year { year: i32 },
}

impl Default for DayRange {
    fn default() -> Self {
        DayRange::Trailing {
            days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl DayRange {
    pub fn days(&self, today: NaiveDate) -> Vec<NaiveDate> {
        match *self {
            DayRange::Trailing { days } => trailing_days(days, today),
            DayRange::Year { year } => year_days(year, today),
        }
    }
}

/// The `len` days ending at and including `today`, ascending.
pub fn trailing_days(len: u32, today: NaiveDate) -> Vec<NaiveDate> {
    if len == 0 {
        return Vec::new();
    }
    let start = today
        .checked_sub_days(Days::new(u64::from(len) - 1))
        .unwrap_or(NaiveDate::MIN);
    start.iter_days().take_while(|day| *day <= today).collect()
}

/// January 1 through December 31 of `year`, clipped so that no day after
/// `today` is ever produced.
pub fn year_days(year: i32, today: NaiveDate) -> Vec<NaiveDate> {
    if year > today.year() {
        return Vec::new();
    }
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Vec::new();
    };
    let end = end.min(today);
    start.iter_days().take_while(|day| *day <= end).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthLabel {
    pub month: String,
    pub index: usize,
}

impl MonthLabel {
    fn for_day(day: NaiveDate, index: usize) -> Self {
        Self {
            month: day.format("%b").to_string(),
            index,
        }
    }
}

/// One label per position in `days` where the calendar month changes,
/// starting with the first day.
pub fn month_labels(days: &[NaiveDate]) -> Vec<MonthLabel> {
    let mut labels = Vec::new();
    let mut current: Option<(i32, u32)> = None;
    for (index, day) in days.iter().enumerate() {
        let month = (day.year(), day.month());
        if current != Some(month) {
            current = Some(month);
            labels.push(MonthLabel::for_day(*day, index));
        }
    }
    labels
}

/// A Sunday-first column of up to seven slots. `None` pads the first column
/// so that every day sits on its weekday row.
pub type WeekColumn = Vec<Option<NaiveDate>>;

pub fn week_columns(days: &[NaiveDate]) -> Vec<WeekColumn> {
    let Some(first) = days.first() else {
        return Vec::new();
    };
    let mut weeks = Vec::with_capacity(days.len() / 7 + 2);
    let mut week: WeekColumn = vec![None; first.weekday().num_days_from_sunday() as usize];
    for day in days {
        week.push(Some(*day));
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        weeks.push(week);
    }
    weeks
}

/// Month labels indexed by week column, using the first real day of each
/// column.
pub fn week_month_labels(weeks: &[WeekColumn]) -> Vec<MonthLabel> {
    let mut labels = Vec::new();
    let mut current: Option<(i32, u32)> = None;
    for (index, week) in weeks.iter().enumerate() {
        let Some(day) = week.iter().flatten().next() else {
            continue;
        };
        let month = (day.year(), day.month());
        if current != Some(month) {
            current = Some(month);
            labels.push(MonthLabel::for_day(*day, index));
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn trailing_window_ends_today() {
        let today = date(2024, 3, 2);
        let days = trailing_days(7, today);
        assert_eq!(days.len(), 7);
        assert_eq!(days.first(), Some(&date(2024, 2, 25)));
        assert_eq!(days.last(), Some(&today));
        assert!(days.windows(2).all(|pair| pair[1] == pair[0].succ_opt().unwrap()));
    }

    #[test]
    fn trailing_window_of_zero_is_empty() {
        assert!(trailing_days(0, date(2024, 3, 2)).is_empty());
        assert_eq!(trailing_days(1, date(2024, 3, 2)), vec![date(2024, 3, 2)]);
    }

    #[test]
    fn default_range_is_a_year_long_window() {
        let today = date(2025, 1, 10);
        let days = DayRange::default().days(today);
        assert_eq!(days.len(), 365);
        assert_eq!(days.first(), Some(&date(2024, 1, 12)));
    }

    #[test]
    fn past_years_are_complete() {
        let today = date(2025, 6, 1);
        assert_eq!(year_days(2023, today).len(), 365);
        let leap = year_days(2024, today);
        assert_eq!(leap.len(), 366);
        assert_eq!(leap.first(), Some(&date(2024, 1, 1)));
        assert_eq!(leap.last(), Some(&date(2024, 12, 31)));
    }

    #[test]
    fn current_year_stops_at_today() {
        let today = date(2025, 2, 3);
        let days = year_days(2025, today);
        assert_eq!(days.len(), 34);
        assert_eq!(days.last(), Some(&today));
        assert!(year_days(2026, today).is_empty());
    }

    #[test]
    fn month_labels_mark_each_change() {
        let days = trailing_days(5, date(2024, 1, 2));
        let labels = month_labels(&days);
        assert_eq!(
            labels,
            vec![
                MonthLabel {
                    month: "Dec".into(),
                    index: 0
                },
                MonthLabel {
                    month: "Jan".into(),
                    index: 3
                },
            ]
        );
        assert!(month_labels(&[]).is_empty());
    }

    #[test]
    fn weeks_pad_leading_days_from_sunday() {
        // 2024-05-01 is a Wednesday.
        let days = trailing_days(10, date(2024, 5, 10));
        let weeks = week_columns(&days);
        assert_eq!(weeks.len(), 2);
        assert!(weeks[0][..3].iter().all(Option::is_none));
        assert_eq!(weeks[0][3], Some(date(2024, 5, 1)));
        assert_eq!(weeks[1].len(), 6);
        assert_eq!(weeks[1].last(), Some(&Some(date(2024, 5, 10))));
        assert!(week_columns(&[]).is_empty());
    }

    #[test]
    fn week_labels_use_column_indices() {
        let days = trailing_days(21, date(2024, 6, 8));
        let weeks = week_columns(&days);
        let labels = week_month_labels(&weeks);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].month, "May");
        assert_eq!(labels[0].index, 0);
        assert_eq!(weeks.len(), 3);
        assert_eq!(labels[1].month, "Jun");
        assert_eq!(labels[1].index, 2);
    }
}
