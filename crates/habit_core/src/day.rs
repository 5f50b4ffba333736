use chrono::NaiveDate;

use crate::error::{HabitError, Result};

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Canonical `YYYY-MM-DD` key for a calendar day.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Parse a canonical day key. Unpadded or otherwise non-canonical input is
/// rejected even when chrono would accept it.
pub fn parse_day_key(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let date = NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT)
        .map_err(|_| HabitError::InvalidDayKey(input.to_string()))?;
    if day_key(date) != trimmed {
        return Err(HabitError::InvalidDayKey(input.to_string()));
    }
    Ok(date)
}

/// Human readable form, e.g. `Jan 5, 2024`.
pub fn format_day(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// `"<first> - <last>"` for a day sequence, empty for an empty one.
pub fn date_range_string(days: &[NaiveDate]) -> String {
    match (days.first(), days.last()) {
        (Some(first), Some(last)) => format!("{} - {}", format_day(*first), format_day(*last)),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_key_is_zero_padded() {
        assert_eq!(day_key(date(2024, 3, 7)), "2024-03-07");
    }

    #[test]
    fn parse_accepts_canonical_keys_only() {
        assert_eq!(parse_day_key("2024-12-31").unwrap(), date(2024, 12, 31));
        assert_eq!(
            parse_day_key("2024-3-7"),
            Err(HabitError::InvalidDayKey("2024-3-7".into()))
        );
        assert!(parse_day_key("2023-02-29").is_err());
        assert!(parse_day_key("yesterday").is_err());
    }

    #[test]
    fn range_string_uses_first_and_last_day() {
        let days = vec![date(2023, 12, 30), date(2023, 12, 31), date(2024, 1, 1)];
        assert_eq!(date_range_string(&days), "Dec 30, 2023 - Jan 1, 2024");
        assert_eq!(date_range_string(&days[..1]), "Dec 30, 2023 - Dec 30, 2023");
        assert_eq!(date_range_string(&[]), "");
    }
}
