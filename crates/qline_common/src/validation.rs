//! Pluggable phone number validation.
//!
//! Profiles carry a free-form phone field. Which numbers are acceptable is a
//! deployment decision, so callers pick a [`PhoneValidator`] instead of the
//! core hard-coding one country's format.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Phone number is empty")]
    EmptyPhone,
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),
}

/// Validates a raw phone number and returns its normalized form.
pub trait PhoneValidator: Send + Sync {
    fn normalize(&self, raw: &str) -> Result<String, ValidationError>;

    fn is_valid(&self, raw: &str) -> bool {
        self.normalize(raw).is_ok()
    }
}

static KENYAN_MOBILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+?254|0)?([17]\d{8})$").expect("kenyan mobile pattern compiles")
});

static INTERNATIONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?([1-9]\d{7,14})$").expect("international pattern compiles"));

fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '(' && *c != ')')
        .collect()
}

/// Kenyan mobile numbers (`07…`, `01…`, `+2547…`, `2541…`), normalized to `+254XXXXXXXXX`.
#[derive(Debug, Default, Clone, Copy)]
pub struct KenyanPhoneValidator;

impl PhoneValidator for KenyanPhoneValidator {
    fn normalize(&self, raw: &str) -> Result<String, ValidationError> {
        let compact = strip_separators(raw);
        if compact.is_empty() {
            return Err(ValidationError::EmptyPhone);
        }
        KENYAN_MOBILE
            .captures(&compact)
            .and_then(|caps| caps.get(1))
            .map(|subscriber| format!("+254{}", subscriber.as_str()))
            .ok_or_else(|| ValidationError::InvalidPhone(raw.to_string()))
    }
}

/// Any E.164-shaped number, normalized with a leading `+`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InternationalPhoneValidator;

impl PhoneValidator for InternationalPhoneValidator {
    fn normalize(&self, raw: &str) -> Result<String, ValidationError> {
        let compact = strip_separators(raw);
        if compact.is_empty() {
            return Err(ValidationError::EmptyPhone);
        }
        INTERNATIONAL
            .captures(&compact)
            .and_then(|caps| caps.get(1))
            .map(|digits| format!("+{}", digits.as_str()))
            .ok_or_else(|| ValidationError::InvalidPhone(raw.to_string()))
    }
}
