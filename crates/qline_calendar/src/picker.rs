// --- File: crates/qline_calendar/src/picker.rs ---
//! The date picker: grid + classification + navigation.
//!
//! The picker is a controlled component. It owns which month is on screen,
//! but never the selection itself: a successful pick is reported through the
//! callback and the owner feeds the authoritative value back with
//! [`CalendarPicker::set_selected_date`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::availability::{AvailabilityContext, AvailabilityState, CellState};
use crate::display::DisplayConfig;
use crate::error::CalendarError;
use crate::grid::{build_weeks, CalendarCell, MonthOffset};
use crate::month::{DateKey, YearMonth};

pub type DateSelectCallback = Box<dyn FnMut(NaiveDate) + Send>;

/// Inputs a page hands to the picker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarProps {
    #[serde(default)]
    pub selected_date: Option<NaiveDate>,
    #[serde(default)]
    pub min_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_date: Option<NaiveDate>,
    #[serde(default)]
    pub disabled_dates: Vec<DateKey>,
    #[serde(default)]
    pub booked_dates: Vec<DateKey>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RenderedCell {
    pub day_number: u32,
    pub date: NaiveDate,
    pub month_offset: MonthOffset,
    /// `None` for adjacent-month placeholders
    pub state: Option<AvailabilityState>,
    pub selectable: bool,
}

impl RenderedCell {
    fn new(cell: &CalendarCell, state: CellState) -> Self {
        Self {
            day_number: cell.day_number(),
            date: cell.date(),
            month_offset: cell.month_offset(),
            state: state.state(),
            selectable: state.is_selectable(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarView {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-02"))]
    pub month: YearMonth,
    pub label: String,
    pub weekday_labels: Vec<String>,
    pub weeks: Vec<Vec<RenderedCell>>,
}

impl CalendarView {
    pub fn cells(&self) -> impl Iterator<Item = &RenderedCell> {
        self.weeks.iter().flatten()
    }
}

pub struct CalendarPicker {
    current_month: YearMonth,
    context: AvailabilityContext,
    display: DisplayConfig,
    on_date_select: DateSelectCallback,
}

impl CalendarPicker {
    /// Creates a picker showing the selected date's month, or today's month
    /// when nothing is selected. Fails with `InvalidDateRange` when
    /// `min_date > max_date`.
    pub fn new<F>(
        props: CalendarProps,
        today: NaiveDate,
        display: DisplayConfig,
        on_date_select: F,
    ) -> Result<Self, CalendarError>
    where
        F: FnMut(NaiveDate) + Send + 'static,
    {
        let context = AvailabilityContext::new(today)
            .with_bounds(props.min_date, props.max_date)?
            .with_disabled_dates(props.disabled_dates)
            .with_booked_dates(props.booked_dates)
            .with_selected_date(props.selected_date);

        let current_month = YearMonth::of(props.selected_date.unwrap_or(today));

        Ok(Self {
            current_month,
            context,
            display,
            on_date_select: Box::new(on_date_select),
        })
    }

    /// Opens the picker on `month` instead of the default.
    pub fn starting_at(mut self, month: YearMonth) -> Self {
        self.current_month = month;
        self
    }

    pub fn current_month(&self) -> YearMonth {
        self.current_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.context.selected_date()
    }

    pub fn context(&self) -> &AvailabilityContext {
        &self.context
    }

    /// Re-render with the owner's authoritative selection.
    pub fn set_selected_date(&mut self, selected: Option<NaiveDate>) {
        self.context.set_selected_date(selected);
    }

    pub fn state_of(&self, date: NaiveDate) -> CellState {
        self.context.classify(date, self.current_month)
    }

    /// Reports `date` to the owner unless its cell is disabled or belongs to
    /// another month. Returns whether the callback fired.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        let state = self.state_of(date);
        if !state.is_selectable() {
            debug!("Ignoring selection of {} ({:?})", date, state);
            return false;
        }
        info!("Date selected: {}", date);
        (self.on_date_select)(date);
        true
    }

    /// Moves one month back. Never blocked by min/max.
    pub fn go_to_previous_month(&mut self) {
        self.current_month = self.current_month.previous();
        debug!("Navigated to {}", self.current_month);
    }

    /// Moves one month forward. Never blocked by min/max.
    pub fn go_to_next_month(&mut self) {
        self.current_month = self.current_month.next();
        debug!("Navigated to {}", self.current_month);
    }

    pub fn render(&self) -> CalendarView {
        let weeks: Vec<Vec<RenderedCell>> = build_weeks(self.current_month)
            .iter()
            .map(|week| {
                week.iter()
                    .map(|cell| RenderedCell::new(cell, self.state_of(cell.date())))
                    .collect()
            })
            .collect();

        CalendarView {
            month: self.current_month,
            label: self.display.month_label(self.current_month),
            weekday_labels: self
                .display
                .weekday_labels()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            weeks,
        }
    }
}
