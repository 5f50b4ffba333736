pub mod activity;
pub mod dashboard;
pub mod day;
pub mod error;
pub mod habit;
pub mod level;
pub mod range;
pub mod sample;
pub mod store;
pub mod streak;

pub use crate::error::{HabitError, Result};
pub use crate::habit::{CompletionRecord, Habit};
pub use crate::level::Level;
pub use crate::range::DayRange;
pub use crate::store::{HabitStore, HabitStoreBuilder, StoreSnapshot};
