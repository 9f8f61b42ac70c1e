//! Timezone and locale handling for calendar labels.
//!
//! Nothing here reads ambient process state besides the wall clock in
//! [`DisplayConfig::today`]; zone and language always come in through
//! [`DisplayConfig`].

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use qline_config::{CalendarConfig, ConfigModelError};
use tracing::debug;

use crate::month::{DateKey, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    Swahili,
}

impl Locale {
    /// Resolves a language tag such as `en`, `en-US` or `sw-KE`. Unknown tags
    /// fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "sw" => Locale::Swahili,
            "en" => Locale::English,
            other => {
                debug!("No labels for locale '{}', using English", other);
                Locale::English
            }
        }
    }

    fn month_names(&self) -> [&'static str; 12] {
        match self {
            Locale::English => [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ],
            Locale::Swahili => [
                "Januari", "Februari", "Machi", "Aprili", "Mei", "Juni", "Julai", "Agosti",
                "Septemba", "Oktoba", "Novemba", "Desemba",
            ],
        }
    }

    /// Short weekday names, Sunday first.
    fn weekday_names(&self) -> [&'static str; 7] {
        match self {
            Locale::English => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Locale::Swahili => ["Jpi", "Jtt", "Jnn", "Jtn", "Alh", "Iju", "Jmo"],
        }
    }
}

/// Explicit zone and language for everything the calendar renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub timezone: Tz,
    pub locale: Locale,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            locale: Locale::English,
        }
    }
}

impl DisplayConfig {
    pub fn new(timezone: Tz, locale: Locale) -> Self {
        Self { timezone, locale }
    }

    pub fn from_config(config: &CalendarConfig) -> Result<Self, ConfigModelError> {
        Ok(Self {
            timezone: config.tz()?,
            locale: Locale::from_tag(&config.locale),
        })
    }

    /// Today's calendar day in the configured zone.
    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }

    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        DateKey::in_zone(&now, &self.timezone).date()
    }

    pub fn month_label(&self, month: YearMonth) -> String {
        let names = self.locale.month_names();
        let name = names
            .get(month.month() as usize - 1)
            .copied()
            .unwrap_or_default();
        format!("{} {}", name, month.year())
    }

    pub fn weekday_labels(&self) -> [&'static str; 7] {
        self.locale.weekday_names()
    }
}
