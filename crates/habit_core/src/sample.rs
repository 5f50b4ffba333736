use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::habit::{CompletionRecord, Habit};
use crate::level::Level;

pub const SAMPLE_DAYS: u64 = 90;

struct DefaultHabit {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    created: (i32, u32, u32),
    color: &'static str,
}

const DEFAULT_HABITS: [DefaultHabit; 3] = [
    DefaultHabit {
        id: "1",
        name: "Exercise",
        description: "Physical activity for at least 30 minutes",
        created: (2023, 1, 1),
        color: "#7bc96f",
    },
    DefaultHabit {
        id: "2",
        name: "Read",
        description: "Read a book for at least 15 minutes",
        created: (2023, 1, 15),
        color: "#c6e48b",
    },
    DefaultHabit {
        id: "3",
        name: "Meditate",
        description: "Meditate for at least 10 minutes",
        created: (2023, 2, 1),
        color: "#239a3b",
    },
];

pub fn default_habits() -> Vec<Habit> {
    DEFAULT_HABITS
        .iter()
        .map(|def| Habit {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: Some(def.description.to_string()),
            created_at: midnight_utc(def.created),
            color: Some(def.color.to_string()),
        })
        .collect()
}

/// Plausible history for the default habits over the [`SAMPLE_DAYS`] days
/// ending at `today`. Today is always left at level 0 so there is something
/// to tick off. Habits other than the defaults get an empty record.
pub fn sample_records(
    habits: &[Habit],
    seed: u64,
    today: NaiveDate,
) -> BTreeMap<String, CompletionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = BTreeMap::new();
    for habit in habits {
        let mut record = CompletionRecord::new();
        for offset in 0..SAMPLE_DAYS {
            let Some(day) = today.checked_sub_days(Days::new(offset)) else {
                break;
            };
            let Some(value) = sample_level(&habit.id, offset, &mut rng) else {
                break;
            };
            let level = if offset == 0 {
                Level::NONE
            } else {
                Level::saturating(value)
            };
            record.set(day, level);
        }
        records.insert(habit.id.clone(), record);
    }
    records
}

fn sample_level(habit_id: &str, offset: u64, rng: &mut StdRng) -> Option<u8> {
    let value = match habit_id {
        // every other day
        "1" => {
            if offset % 2 == 0 {
                rng.gen_range(1..=3)
            } else {
                0
            }
        }
        "2" => {
            if rng.gen_bool(0.7) {
                rng.gen_range(1..=4)
            } else {
                0
            }
        }
        "3" => {
            if rng.gen_bool(0.4) {
                rng.gen_range(1..=2)
            } else {
                0
            }
        }
        _ => return None,
    };
    Some(value)
}

fn midnight_utc((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_habits_have_stable_ids() {
        let habits = default_habits();
        let ids: Vec<&str> = habits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(habits[1].name, "Read");
        assert_eq!(habits[2].created_at.date_naive(), date(2023, 2, 1));
    }

    #[test]
    fn sample_history_covers_ninety_days_with_empty_today() {
        let today = date(2024, 5, 20);
        let records = sample_records(&default_habits(), 7, today);
        assert_eq!(records.len(), 3);
        for record in records.values() {
            assert_eq!(record.len(), 90);
            assert_eq!(record.get(today), Some(Level::NONE));
            assert_eq!(record.iter().next().map(|(day, _)| day), Some(date(2024, 2, 21)));
        }
        let exercise = &records["1"];
        assert!(exercise.level_on(date(2024, 5, 18)).is_completed());
        assert_eq!(exercise.level_on(date(2024, 5, 19)), Level::NONE);
        assert!(records["3"].iter().all(|(_, level)| level <= Level::MEDIUM));
    }

    #[test]
    fn same_seed_same_history() {
        let today = date(2024, 5, 20);
        let habits = default_habits();
        assert_eq!(
            sample_records(&habits, 11, today),
            sample_records(&habits, 11, today)
        );
    }

    #[test]
    fn custom_habits_start_empty() {
        let habit = Habit::builder("floss", "Floss").build().unwrap();
        let records = sample_records(&[habit], 1, date(2024, 5, 20));
        assert!(records["floss"].is_empty());
    }
}
