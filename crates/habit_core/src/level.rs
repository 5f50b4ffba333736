use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HabitError;

/// Intensity in `0..=4`. Used both for one habit's self-reported level and
/// for the aggregate activity level of a day.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const NONE: Level = Level(0);
    pub const LIGHT: Level = Level(1);
    pub const MEDIUM: Level = Level(2);
    pub const HIGH: Level = Level(3);
    pub const MAX: Level = Level(4);

    pub fn new(value: u8) -> Result<Self, HabitError> {
        if value > Self::MAX.0 {
            return Err(HabitError::InvalidLevel(value));
        }
        Ok(Self(value))
    }

    /// Clamps out-of-range input to [`Level::MAX`].
    pub fn saturating(value: u8) -> Self {
        Self(value.min(Self::MAX.0))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_completed(self) -> bool {
        self.0 > 0
    }

    /// Saturating bucket for the number of distinct habits completed on a day.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::NONE,
            1 => Self::LIGHT,
            2 => Self::MEDIUM,
            3 => Self::HIGH,
            _ => Self::MAX,
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = HabitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
