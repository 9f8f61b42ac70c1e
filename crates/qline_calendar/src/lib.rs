// --- File: crates/qline_calendar/src/lib.rs ---
pub mod availability;
pub mod display;
pub mod error;
pub mod grid;
#[cfg(test)]
mod grid_proptest;
pub mod month;
pub mod picker;
pub mod slot_picker;
pub mod slots;
#[cfg(test)]
mod slots_test;

pub use availability::{classify, AvailabilityContext, AvailabilityState, CellState};
pub use display::{DisplayConfig, Locale};
pub use error::{CalendarError, SlotError};
pub use grid::{build_grid, build_weeks, CalendarCell, MonthOffset};
pub use month::{DateKey, YearMonth};
pub use picker::{CalendarPicker, CalendarProps, CalendarView, RenderedCell};
pub use slot_picker::{PeriodView, SlotView, TimeSlotPicker};
pub use slots::{group, AvailabilityTier, Period, SlotGroups, SlotOffering, TimeSlot, TimeSlotInput};
