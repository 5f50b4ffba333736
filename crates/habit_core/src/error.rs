use thiserror::Error;

/// Validation failures reported by the habit store and the day-key parser.
///
/// Every variant leaves the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HabitError {
    #[error("level {0} is outside the range 0..=4")]
    InvalidLevel(u8),

    #[error("unknown habit `{0}`")]
    UnknownHabit(String),

    #[error("habit `{0}` already exists")]
    DuplicateHabit(String),

    #[error("`{0}` is not a YYYY-MM-DD day key")]
    InvalidDayKey(String),

    #[error("habit name must not be empty")]
    EmptyHabitName,
}

pub type Result<T> = std::result::Result<T, HabitError>;
