// --- File: crates/qline_calendar/src/availability.rs ---
//! Per-day availability classification.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CalendarError;
use crate::month::{DateKey, YearMonth};

/// Display state of an in-month day.
///
/// `Today` and `BookedLimited` can still be picked; the two disabled states
/// can never be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityState {
    Selectable,
    DisabledOutOfRange,
    DisabledExplicit,
    BookedLimited,
    Selected,
    Today,
}

impl AvailabilityState {
    pub fn is_disabled(&self) -> bool {
        matches!(
            self,
            AvailabilityState::DisabledOutOfRange | AvailabilityState::DisabledExplicit
        )
    }

    pub fn is_selectable(&self) -> bool {
        !self.is_disabled()
    }
}

/// Result of classifying one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Day of an adjacent month; rendered but inert.
    Placeholder,
    Active(AvailabilityState),
}

impl CellState {
    pub fn state(&self) -> Option<AvailabilityState> {
        match self {
            CellState::Placeholder => None,
            CellState::Active(state) => Some(*state),
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.state().is_some_and(|s| s.is_selectable())
    }
}

/// Everything besides the date itself that decides a cell's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityContext {
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
    disabled_dates: HashSet<DateKey>,
    booked_dates: HashSet<DateKey>,
    selected_date: Option<NaiveDate>,
    today: NaiveDate,
}

impl AvailabilityContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            min_date: None,
            max_date: None,
            disabled_dates: HashSet::new(),
            booked_dates: HashSet::new(),
            selected_date: None,
            today,
        }
    }

    /// Sets the selectable window. Fails when both bounds are set and
    /// `min > max`.
    pub fn with_bounds(
        mut self,
        min_date: Option<NaiveDate>,
        max_date: Option<NaiveDate>,
    ) -> Result<Self, CalendarError> {
        if let (Some(min), Some(max)) = (min_date, max_date) {
            if min > max {
                return Err(CalendarError::InvalidDateRange { min, max });
            }
        }
        self.min_date = min_date;
        self.max_date = max_date;
        Ok(self)
    }

    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = DateKey>) -> Self {
        self.disabled_dates = dates.into_iter().collect();
        self
    }

    pub fn with_booked_dates(mut self, dates: impl IntoIterator<Item = DateKey>) -> Self {
        self.booked_dates = dates.into_iter().collect();
        self
    }

    pub fn with_selected_date(mut self, selected: Option<NaiveDate>) -> Self {
        self.selected_date = selected;
        self
    }

    pub fn set_selected_date(&mut self, selected: Option<NaiveDate>) {
        self.selected_date = selected;
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.min_date
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.max_date
    }

    pub fn is_out_of_range(&self, date: NaiveDate) -> bool {
        self.min_date.is_some_and(|min| date < min) || self.max_date.is_some_and(|max| date > max)
    }

    /// Classifies `date` as shown in `displayed`. First matching rule wins:
    /// adjacent month, out of range, explicitly disabled, selected, today,
    /// booked, otherwise selectable.
    pub fn classify(&self, date: NaiveDate, displayed: YearMonth) -> CellState {
        if !displayed.contains(date) {
            return CellState::Placeholder;
        }
        let key = DateKey::from(date);
        let state = if self.is_out_of_range(date) {
            AvailabilityState::DisabledOutOfRange
        } else if self.disabled_dates.contains(&key) {
            AvailabilityState::DisabledExplicit
        } else if self.selected_date == Some(date) {
            AvailabilityState::Selected
        } else if self.today == date {
            AvailabilityState::Today
        } else if self.booked_dates.contains(&key) {
            AvailabilityState::BookedLimited
        } else {
            AvailabilityState::Selectable
        };
        CellState::Active(state)
    }
}

/// Free-function form of [`AvailabilityContext::classify`].
pub fn classify(date: NaiveDate, displayed: YearMonth, context: &AvailabilityContext) -> CellState {
    context.classify(date, displayed)
}
