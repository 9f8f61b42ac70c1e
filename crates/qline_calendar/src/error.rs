use chrono::NaiveDate;
use thiserror::Error;

/// Errors from calendar construction. Disabled or booked dates are never
/// errors; they only make a cell inert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid date range: min date {min} is after max date {max}")]
    InvalidDateRange { min: NaiveDate, max: NaiveDate },
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Failed to parse time label: {0}")]
    InvalidTimeLabel(String),
    #[error("Time {0} is outside bookable hours (08:00-20:00)")]
    OutsideBookableHours(String),
    #[error("Booked count {booked} exceeds capacity {capacity}")]
    OverBooked { booked: u32, capacity: u32 },
    #[error("Time slot {0} is listed more than once")]
    DuplicateTime(String),
}
