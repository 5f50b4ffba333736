use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    activity::ActivityMap,
    day,
    habit::Habit,
    level::Level,
    range::{self, DayRange, MonthLabel, WeekColumn},
    store::StoreSnapshot,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub level: Level,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitSummary {
    pub habit: Habit,
    pub today_level: Level,
    pub streak: u32,
    pub completed_days: usize,
}

/// Everything a contribution-graph view needs for one range and one "today".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub today: NaiveDate,
    pub range: DayRange,
    pub range_label: String,
    pub filter: Option<String>,
    pub cells: Vec<DayCell>,
    pub weeks: Vec<WeekColumn>,
    pub month_labels: Vec<MonthLabel>,
    pub day_labels: Vec<String>,
    pub total_contributions: usize,
    pub current_streak: u32,
    pub habits: Vec<HabitSummary>,
}

/// With `filter` set, cells carry that habit's own levels and the
/// contribution total counts only its completed days.
pub fn build_dashboard(
    snapshot: &StoreSnapshot,
    range: DayRange,
    today: NaiveDate,
    filter: Option<&str>,
) -> DashboardSnapshot {
    let days = range.days(today);
    let (levels, total_contributions): (ActivityMap, usize) = match filter {
        Some(habit_id) => (
            snapshot.habit_activity(habit_id, &days),
            snapshot
                .record(habit_id)
                .map(|record| record.completed_days())
                .unwrap_or(0),
        ),
        None => (snapshot.activity(&days), snapshot.total_contributions()),
    };
    let cells = days
        .iter()
        .map(|date| DayCell {
            date: *date,
            level: levels.get(date).copied().unwrap_or_default(),
        })
        .collect();
    let weeks = range::week_columns(&days);
    let month_labels = range::week_month_labels(&weeks);

    let habits = snapshot
        .habits()
        .iter()
        .map(|habit| {
            let record = snapshot.record(&habit.id);
            HabitSummary {
                habit: habit.clone(),
                today_level: record.map(|r| r.level_on(today)).unwrap_or_default(),
                streak: snapshot.streak(&habit.id),
                completed_days: record.map(|r| r.completed_days()).unwrap_or(0),
            }
        })
        .collect();

    DashboardSnapshot {
        today,
        range,
        range_label: day::date_range_string(&days),
        filter: filter.map(str::to_string),
        cells,
        weeks,
        month_labels,
        day_labels: range::DAY_LABELS.iter().map(|label| label.to_string()).collect(),
        total_contributions,
        current_streak: snapshot.current_streak(today),
        habits,
    }
}
