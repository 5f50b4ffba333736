use std::collections::BTreeMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    activity::{self, ActivityMap},
    dashboard::{self, DashboardSnapshot},
    day,
    error::{HabitError, Result},
    habit::{CompletionRecord, Habit},
    level::Level,
    range::DayRange,
    sample, streak,
};

/// Owns the habits and their completion records. Every mutation takes the
/// write lock once, so it either applies completely or not at all, and is
/// visible to the next read.
pub struct HabitStore {
    state: RwLock<StoreSnapshot>,
}

pub struct HabitStoreBuilder {
    habits: Vec<Habit>,
    sample: Option<(u64, NaiveDate)>,
}

impl HabitStoreBuilder {
    pub fn new() -> Self {
        Self {
            habits: Vec::new(),
            sample: None,
        }
    }

    pub fn add_habit(mut self, habit: Habit) -> Self {
        self.habits.push(habit);
        self
    }

    pub fn with_default_habits(mut self) -> Self {
        self.habits.extend(sample::default_habits());
        self
    }

    /// Default habits plus generated history ending at `today`.
    pub fn with_sample_data(self, seed: u64, today: NaiveDate) -> Self {
        let mut builder = self.with_default_habits();
        builder.sample = Some((seed, today));
        builder
    }

    pub fn build(self) -> Result<HabitStore> {
        let store = HabitStore::new();
        for habit in self.habits {
            store.add_habit(habit)?;
        }
        if let Some((seed, today)) = self.sample {
            let mut state = store.state.write();
            let generated = sample::sample_records(&state.habits, seed, today);
            for (id, record) in generated {
                if let Some(existing) = state.records.get_mut(&id) {
                    *existing = record;
                }
            }
            info!(seed, %today, "seeded sample history");
        }
        Ok(store)
    }
}

impl Default for HabitStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreSnapshot::default()),
        }
    }

    pub fn builder() -> HabitStoreBuilder {
        HabitStoreBuilder::new()
    }

    /// Registers `habit` with an empty record.
    #[instrument(skip(self, habit), fields(habit_id = %habit.id))]
    pub fn add_habit(&self, habit: Habit) -> Result<()> {
        let mut state = self.state.write();
        if state.records.contains_key(&habit.id) {
            warn!("rejected duplicate habit");
            return Err(HabitError::DuplicateHabit(habit.id));
        }
        debug!(name = %habit.name, "habit added");
        state.records.insert(habit.id.clone(), CompletionRecord::new());
        state.habits.push(habit);
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn set_level(&self, habit_id: &str, day: NaiveDate, level: u8) -> Result<()> {
        let level = Level::new(level).inspect_err(|_| warn!("rejected out-of-range level"))?;
        let mut state = self.state.write();
        let Some(record) = state.records.get_mut(habit_id) else {
            warn!("rejected level for unknown habit");
            return Err(HabitError::UnknownHabit(habit_id.to_string()));
        };
        let previous = record.set(day, level);
        debug!(?previous, "level stored");
        Ok(())
    }

    /// [`HabitStore::set_level`] addressed by a `YYYY-MM-DD` key.
    pub fn set_level_by_key(&self, habit_id: &str, day_key: &str, level: u8) -> Result<()> {
        let day = day::parse_day_key(day_key)?;
        self.set_level(habit_id, day, level)
    }

    /// Flips today's entry between "not done" and a medium completion and
    /// returns the new level.
    #[instrument(skip(self))]
    pub fn toggle_today(&self, habit_id: &str, today: NaiveDate) -> Result<Level> {
        let mut state = self.state.write();
        let Some(record) = state.records.get_mut(habit_id) else {
            warn!("rejected toggle for unknown habit");
            return Err(HabitError::UnknownHabit(habit_id.to_string()));
        };
        let next = if record.level_on(today).is_completed() {
            Level::NONE
        } else {
            Level::MEDIUM
        };
        record.set(today, next);
        debug!(%next, "toggled");
        Ok(next)
    }

    /// Copy of a habit's record. Unknown ids read as an empty record.
    pub fn record(&self, habit_id: &str) -> CompletionRecord {
        self.state
            .read()
            .records
            .get(habit_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn level_on(&self, habit_id: &str, day: NaiveDate) -> Level {
        self.state
            .read()
            .records
            .get(habit_id)
            .map(|record| record.level_on(day))
            .unwrap_or_default()
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.state.read().habits.clone()
    }

    pub fn habit(&self, habit_id: &str) -> Option<Habit> {
        self.state.read().habit(habit_id).cloned()
    }

    pub fn contains(&self, habit_id: &str) -> bool {
        self.state.read().records.contains_key(habit_id)
    }

    pub fn len(&self) -> usize {
        self.state.read().habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().habits.is_empty()
    }

    /// Point-in-time copy that the pure computations run against.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.read().clone()
    }

    pub fn activity(&self, days: &[NaiveDate]) -> ActivityMap {
        self.snapshot().activity(days)
    }

    pub fn streak(&self, habit_id: &str) -> u32 {
        self.snapshot().streak(habit_id)
    }

    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        self.snapshot().current_streak(today)
    }

    pub fn dashboard(
        &self,
        range: DayRange,
        today: NaiveDate,
        filter: Option<&str>,
    ) -> DashboardSnapshot {
        dashboard::build_dashboard(&self.snapshot(), range, today, filter)
    }
}

impl Default for HabitStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Habits in insertion order together with their records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSnapshot {
    habits: Vec<Habit>,
    records: BTreeMap<String, CompletionRecord>,
}

/// One habit's own level on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitDayLevel {
    pub habit_id: String,
    pub name: String,
    pub level: Level,
}

impl StoreSnapshot {
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == habit_id)
    }

    pub fn record(&self, habit_id: &str) -> Option<&CompletionRecord> {
        self.records.get(habit_id)
    }

    /// Records in habit insertion order.
    pub fn records(&self) -> Vec<&CompletionRecord> {
        self.habits
            .iter()
            .filter_map(|habit| self.records.get(&habit.id))
            .collect()
    }

    pub fn activity(&self, days: &[NaiveDate]) -> ActivityMap {
        activity::activity_levels(&self.records(), days)
    }

    pub fn habit_activity(&self, habit_id: &str, days: &[NaiveDate]) -> ActivityMap {
        match self.record(habit_id) {
            Some(record) => activity::habit_activity_levels(record, days),
            None => activity::habit_activity_levels(&CompletionRecord::new(), days),
        }
    }

    pub fn streak(&self, habit_id: &str) -> u32 {
        self.record(habit_id).map(streak::habit_streak).unwrap_or(0)
    }

    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        streak::current_streak(&self.records(), today)
    }

    pub fn total_contributions(&self) -> usize {
        activity::total_contributions(&self.records())
    }

    /// Habits completed on `day`, with their own levels.
    pub fn day_breakdown(&self, day: NaiveDate) -> Vec<HabitDayLevel> {
        self.habits
            .iter()
            .filter_map(|habit| {
                let level = self.records.get(&habit.id)?.level_on(day);
                level.is_completed().then(|| HabitDayLevel {
                    habit_id: habit.id.clone(),
                    name: habit.name.clone(),
                    level,
                })
            })
            .collect()
    }
}
