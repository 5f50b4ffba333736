use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HabitError, Result};
use crate::level::Level;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub color: Option<String>,
}

impl Habit {
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> HabitBuilder {
        HabitBuilder::new(id.into(), name.into())
    }
}

pub struct HabitBuilder {
    id: String,
    name: String,
    description: Option<String>,
    created_at: Option<DateTime<Utc>>,
    color: Option<String>,
}

impl HabitBuilder {
    fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
            created_at: None,
            color: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Trims name and description; a blank name is rejected and a blank
    /// description is dropped.
    pub fn build(self) -> Result<Habit> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(HabitError::EmptyHabitName);
        }
        let description = self
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        Ok(Habit {
            id: self.id,
            name,
            description,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            color: self.color,
        })
    }
}

/// Sparse day → level record for one habit. Absent days read as level 0.
///
/// Keys are ordered by calendar value, never by their string form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CompletionRecord {
    levels: BTreeMap<NaiveDate, Level>,
}

impl CompletionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level_on(&self, day: NaiveDate) -> Level {
        self.levels.get(&day).copied().unwrap_or_default()
    }

    pub fn get(&self, day: NaiveDate) -> Option<Level> {
        self.levels.get(&day).copied()
    }

    /// Stores `level` for `day`, returning the previously stored value.
    /// An explicit zero is kept as an entry.
    pub fn set(&mut self, day: NaiveDate, level: Level) -> Option<Level> {
        self.levels.insert(day, level)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Stored entries in ascending calendar order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, Level)> + '_ {
        self.levels.iter().map(|(day, level)| (*day, *level))
    }

    pub fn completed_days(&self) -> usize {
        self.levels.values().filter(|level| level.is_completed()).count()
    }

    pub fn most_recent_day(&self) -> Option<NaiveDate> {
        self.levels.keys().next_back().copied()
    }
}

impl FromIterator<(NaiveDate, Level)> for CompletionRecord {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Level)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}
