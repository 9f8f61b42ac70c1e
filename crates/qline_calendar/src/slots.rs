// --- File: crates/qline_calendar/src/slots.rs ---
//! Time slots, day periods and availability tiers.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SlotError;

/// Fixed partition of the bookable day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// [08:00, 12:00)
    Morning,
    /// [12:00, 17:00)
    Afternoon,
    /// [17:00, 20:00)
    Evening,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Morning, Period::Afternoon, Period::Evening];

    /// The period `time` falls in, or `None` outside 08:00-20:00.
    pub fn of(time: NaiveTime) -> Option<Self> {
        match time.hour() {
            8..=11 => Some(Period::Morning),
            12..=16 => Some(Period::Afternoon),
            17..=19 => Some(Period::Evening),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Afternoon => "Afternoon",
            Period::Evening => "Evening",
        }
    }
}

/// How full an open slot looks to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityTier {
    ManySpots,
    FewSpots,
    LastSpots,
}

impl AvailabilityTier {
    /// Maps a remaining-capacity ratio onto a tier: `>= 0.75` many,
    /// `[0.25, 0.75)` few, `(0, 0.25)` last. A zero ratio means the slot is
    /// full and has no tier.
    pub fn from_ratio(ratio: f64) -> Option<Self> {
        if ratio >= 0.75 {
            Some(AvailabilityTier::ManySpots)
        } else if ratio >= 0.25 {
            Some(AvailabilityTier::FewSpots)
        } else if ratio > 0.0 {
            Some(AvailabilityTier::LastSpots)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AvailabilityTier::ManySpots => "many spots",
            AvailabilityTier::FewSpots => "few spots",
            AvailabilityTier::LastSpots => "last spots",
        }
    }
}

impl fmt::Display for AvailabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a slot offers right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "status", content = "tier", rename_all = "snake_case")]
pub enum SlotOffering {
    /// Zero capacity: the business does not offer this time at all.
    NotOffered,
    /// Explicitly closed by the business.
    Closed,
    Full,
    Open(AvailabilityTier),
}

/// Wire shape of a slot before validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimeSlotInput {
    pub time: String,
    pub total_capacity: u32,
    #[serde(default)]
    pub booked_count: u32,
    #[serde(default)]
    pub closed: bool,
}

/// A bookable time with its capacity. `booked_count <= total_capacity` and
/// the period always matches the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimeSlotInput")]
pub struct TimeSlot {
    time: String,
    #[serde(skip)]
    start: NaiveTime,
    period: Period,
    total_capacity: u32,
    booked_count: u32,
    closed: bool,
}

fn parse_time_label(label: &str) -> Result<NaiveTime, SlotError> {
    let trimmed = label.trim();
    ["%I:%M %p", "%I:%M%p", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| SlotError::InvalidTimeLabel(label.to_string()))
}

impl TimeSlot {
    /// Builds a slot from a label such as `"9:00 AM"` or `"14:30"`.
    pub fn new(time: &str, total_capacity: u32, booked_count: u32) -> Result<Self, SlotError> {
        let start = parse_time_label(time)?;
        let period =
            Period::of(start).ok_or_else(|| SlotError::OutsideBookableHours(time.to_string()))?;
        if booked_count > total_capacity {
            return Err(SlotError::OverBooked {
                booked: booked_count,
                capacity: total_capacity,
            });
        }
        Ok(Self {
            time: time.trim().to_string(),
            start,
            period,
            total_capacity,
            booked_count,
            closed: false,
        })
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn total_capacity(&self) -> u32 {
        self.total_capacity
    }

    pub fn booked_count(&self) -> u32 {
        self.booked_count
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_available(&self) -> bool {
        self.booked_count < self.total_capacity && !self.closed
    }

    /// Remaining share of capacity; `None` when the slot has no capacity.
    pub fn availability_ratio(&self) -> Option<f64> {
        if self.total_capacity == 0 {
            return None;
        }
        let remaining = self.total_capacity - self.booked_count;
        Some(f64::from(remaining) / f64::from(self.total_capacity))
    }

    /// Display tier; only computed for available slots.
    pub fn tier(&self) -> Option<AvailabilityTier> {
        if !self.is_available() {
            return None;
        }
        let tier = self.availability_ratio().and_then(AvailabilityTier::from_ratio);
        if tier.is_none() {
            debug!("Available slot {} produced no tier", self.time);
        }
        tier
    }

    pub fn offering(&self) -> SlotOffering {
        if self.total_capacity == 0 {
            SlotOffering::NotOffered
        } else if self.closed {
            SlotOffering::Closed
        } else {
            match self.tier() {
                Some(tier) => SlotOffering::Open(tier),
                None => SlotOffering::Full,
            }
        }
    }
}

impl TryFrom<TimeSlotInput> for TimeSlot {
    type Error = SlotError;

    fn try_from(input: TimeSlotInput) -> Result<Self, Self::Error> {
        Ok(TimeSlot::new(&input.time, input.total_capacity, input.booked_count)?
            .closed(input.closed))
    }
}

/// Slots bucketed by period, morning first. Only non-empty periods are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotGroups(BTreeMap<Period, Vec<TimeSlot>>);

impl SlotGroups {
    pub fn get(&self, period: Period) -> Option<&[TimeSlot]> {
        self.0.get(&period).map(Vec::as_slice)
    }

    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, &[TimeSlot])> {
        self.0.iter().map(|(p, slots)| (*p, slots.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<Period, Vec<TimeSlot>> {
        self.0
    }
}

/// Groups slots by period, keeping their relative input order.
pub fn group(slots: impl IntoIterator<Item = TimeSlot>) -> SlotGroups {
    let mut groups: BTreeMap<Period, Vec<TimeSlot>> = BTreeMap::new();
    for slot in slots {
        groups.entry(slot.period()).or_default().push(slot);
    }
    SlotGroups(groups)
}
