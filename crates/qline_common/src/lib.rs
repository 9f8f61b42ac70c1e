// --- File: crates/qline_common/src/lib.rs ---

// Shared building blocks for every qline crate: the service error type and
// its HTTP mapping, logging set-up, and pluggable input validation.
pub mod error;
pub mod http;
pub mod logging;
pub mod validation;

pub use error::{
    config_error, not_found, parse_error, validation_error, Context, HttpStatusCode,
    QlineError,
};

pub use http::map_json_error;

pub use logging::{init, init_with_level, log_error, log_result};

pub use validation::{
    InternationalPhoneValidator, KenyanPhoneValidator, PhoneValidator, ValidationError,
};
