//! Time slot picker for a chosen day. Controlled like the date picker: the
//! owner keeps the selected time and feeds it back.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::SlotError;
use crate::slots::{group, Period, SlotOffering, TimeSlot};

pub type TimeSelectCallback = Box<dyn FnMut(&TimeSlot) + Send>;

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotView {
    pub time: String,
    pub offering: SlotOffering,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub tier_label: Option<&'static str>,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PeriodView {
    pub period: Period,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub label: &'static str,
    pub slots: Vec<SlotView>,
}

pub struct TimeSlotPicker {
    time_slots: Vec<TimeSlot>,
    selected_time: Option<String>,
    on_time_select: TimeSelectCallback,
}

/// Slots are picked by label, so a label may appear only once.
fn ensure_unique_times(time_slots: &[TimeSlot]) -> Result<(), SlotError> {
    let mut seen = HashSet::new();
    match time_slots.iter().find(|slot| !seen.insert(slot.time())) {
        Some(duplicate) => Err(SlotError::DuplicateTime(duplicate.time().to_string())),
        None => Ok(()),
    }
}

impl TimeSlotPicker {
    /// Fails with [`SlotError::DuplicateTime`] when two slots share a label.
    pub fn new<F>(
        time_slots: Vec<TimeSlot>,
        selected_time: Option<String>,
        on_time_select: F,
    ) -> Result<Self, SlotError>
    where
        F: FnMut(&TimeSlot) + Send + 'static,
    {
        ensure_unique_times(&time_slots)?;
        Ok(Self {
            time_slots,
            selected_time,
            on_time_select: Box::new(on_time_select),
        })
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    pub fn set_selected_time(&mut self, time: Option<String>) {
        self.selected_time = time;
    }

    /// Replaces the offered slots. The current slots stay when the new ones
    /// repeat a label.
    pub fn set_time_slots(&mut self, time_slots: Vec<TimeSlot>) -> Result<(), SlotError> {
        ensure_unique_times(&time_slots)?;
        self.time_slots = time_slots;
        Ok(())
    }

    /// Reports the slot labelled `time` unless it is unknown or unavailable.
    pub fn select(&mut self, time: &str) -> bool {
        let Some(slot) = self.time_slots.iter().find(|s| s.time() == time) else {
            debug!("Ignoring selection of unknown slot {}", time);
            return false;
        };
        if !slot.is_available() {
            debug!("Ignoring selection of unavailable slot {}", time);
            return false;
        }
        info!("Time slot selected: {}", time);
        (self.on_time_select)(slot);
        true
    }

    pub fn render(&self) -> Vec<PeriodView> {
        group(self.time_slots.iter().cloned())
            .iter()
            .map(|(period, slots)| PeriodView {
                period,
                label: period.label(),
                slots: slots
                    .iter()
                    .map(|slot| SlotView {
                        time: slot.time().to_string(),
                        offering: slot.offering(),
                        tier_label: slot.tier().map(|t| t.label()),
                        selected: self.selected_time.as_deref() == Some(slot.time()),
                        disabled: !slot.is_available(),
                    })
                    .collect(),
            })
            .collect()
    }
}
