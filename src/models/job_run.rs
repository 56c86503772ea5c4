use crate::core::calendar;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// One driver's activity for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRunRecord {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,         // ⇔ job_runs.date (TEXT "YYYY-MM-DD")
    pub round_info: String,      // ⇔ job_runs.round_info (max 30 chars)
    pub remarks: Option<String>, // ⇔ job_runs.remarks (NULL when blank)
    pub created_date: String,
    pub last_updated_date: String,
}

impl JobRunRecord {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn remarks_str(&self) -> &str {
        self.remarks.as_deref().unwrap_or("")
    }
}

impl fmt::Display for JobRunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.date_str(), self.round_info)
    }
}

/// Round label and remarks submitted for a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayEntry {
    pub round_info: String,
    pub remarks: String,
}

impl DayEntry {
    pub fn new(round_info: impl Into<String>, remarks: impl Into<String>) -> Self {
        Self {
            round_info: round_info.into(),
            remarks: remarks.into(),
        }
    }

    /// Trimmed copy, or `None` when both fields are blank.
    pub fn normalized(&self) -> Option<DayEntry> {
        let round_info = self.round_info.trim();
        let remarks = self.remarks.trim();
        if round_info.is_empty() && remarks.is_empty() {
            None
        } else {
            Some(DayEntry::new(round_info, remarks))
        }
    }
}

/// A (year, month) pair; month is always within 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSpec {
    year: i32,
    month: u32,
    #[serde(skip)]
    days: u32,
}

impl MonthSpec {
    /// Every day of the month must be a date chrono can represent, so
    /// `day(1..=days)` never fails on a built value.
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        let days = calendar::days_in_month(year, month)?;
        if NaiveDate::from_ymd_opt(year, month, 1).is_none()
            || NaiveDate::from_ymd_opt(year, month, days).is_none()
        {
            return Err(AppError::InvalidInput(format!("Year {} is out of range", year)));
        }
        Ok(Self { year, month, days })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Parse the request representation: a year string and a (two-digit) month string.
    pub fn parse(year: &str, month: &str) -> AppResult<Self> {
        let y = year
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::InvalidInput(format!("Invalid year '{}'", year)))?;
        let m = month
            .trim()
            .parse::<u32>()
            .map_err(|_| AppError::InvalidInput(format!("Invalid month '{}'", month)))?;
        Self::new(y, m)
    }

    /// Parse `YYYY-MM`.
    pub fn parse_period(period: &str) -> AppResult<Self> {
        let (y, m) = period
            .split_once('-')
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid period '{}'", period)))?;
        Self::parse(y, m)
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn first_day(&self) -> AppResult<NaiveDate> {
        self.day(1)
    }

    pub fn last_day(&self) -> AppResult<NaiveDate> {
        self.day(self.days())
    }

    pub fn day(&self, day: u32) -> AppResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day).ok_or_else(|| {
            AppError::InvalidDate(format!("{:04}-{:02}-{:02}", self.year, self.month, day))
        })
    }

    pub fn month_str(&self) -> String {
        format!("{:02}", self.month)
    }
}

impl fmt::Display for MonthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
