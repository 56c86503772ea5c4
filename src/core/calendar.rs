//! Calendar helpers: month lengths under the Gregorian leap-year rule.

use crate::errors::{AppError, AppResult};

/// Gregorian leap year: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1..=12) of `year`.
///
/// Months outside 1..=12 are rejected with `InvalidInput`.
pub fn days_in_month(year: i32, month: u32) -> AppResult<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        other => Err(AppError::InvalidInput(format!(
            "Month must be between 1 and 12, got {}",
            other
        ))),
    }
}
