// --- File: crates/qline_calendar/src/grid.rs ---
//! Month grid generation.
//!
//! A month is laid out in Sunday-first rows of seven. The first row is padded
//! with the tail of the previous month and the last row with the head of the
//! next month, so the grid always holds complete weeks.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use tracing::trace;

use crate::month::{weekday_index, YearMonth};

pub const DAYS_PER_WEEK: usize = 7;

/// Which month a cell belongs to, relative to the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum MonthOffset {
    Previous,
    Current,
    Next,
}

/// One day in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    day_number: u32,
    month_offset: MonthOffset,
    date: NaiveDate,
}

impl CalendarCell {
    fn new(date: NaiveDate, month_offset: MonthOffset) -> Self {
        Self {
            day_number: date.day(),
            month_offset,
            date,
        }
    }

    pub fn day_number(&self) -> u32 {
        self.day_number
    }

    pub fn month_offset(&self) -> MonthOffset {
        self.month_offset
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_current_month(&self) -> bool {
        self.month_offset == MonthOffset::Current
    }
}

/// Builds the grid for `month`: leading days of the previous month,
/// every day of `month`, then trailing days of the next month.
///
/// The result length is a multiple of 7 and the first cell sits in the
/// Sunday column.
pub fn build_grid(month: YearMonth) -> Vec<CalendarCell> {
    let first = month.first_day();
    let lead = weekday_index(first) as u64;
    let days = month.days_in_month() as u64;
    let trail = (DAYS_PER_WEEK as u64 - (lead + days) % DAYS_PER_WEEK as u64)
        % DAYS_PER_WEEK as u64;

    let mut cells = Vec::with_capacity((lead + days + trail) as usize);

    // Previous month tail, ascending.
    cells.extend(
        (1..=lead)
            .rev()
            .filter_map(|back| first.checked_sub_days(Days::new(back)))
            .map(|date| CalendarCell::new(date, MonthOffset::Previous)),
    );

    cells.extend(
        (0..days)
            .filter_map(|offset| first.checked_add_days(Days::new(offset)))
            .map(|date| CalendarCell::new(date, MonthOffset::Current)),
    );

    cells.extend(
        (0..trail)
            .filter_map(|offset| first.checked_add_days(Days::new(days + offset)))
            .map(|date| CalendarCell::new(date, MonthOffset::Next)),
    );

    trace!(
        "Built grid for {}: {} leading, {} current, {} trailing",
        month,
        lead,
        days,
        trail
    );
    cells
}

/// The grid split into Sunday-first rows of seven.
pub fn build_weeks(month: YearMonth) -> Vec<[CalendarCell; DAYS_PER_WEEK]> {
    build_grid(month)
        .chunks_exact(DAYS_PER_WEEK)
        .filter_map(|week| <[CalendarCell; DAYS_PER_WEEK]>::try_from(week).ok())
        .collect()
}
