// --- File: crates/qline_config/src/models.rs ---

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::ConfigModelError;

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Calendar display Config ---
// Replaces ambient browser globals: every date computation that needs "today"
// or a label reads these two values explicitly.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalendarConfig {
    /// IANA zone name, e.g. "Africa/Nairobi"
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Language tag for month and weekday labels, e.g. "en" or "sw"
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl CalendarConfig {
    /// Parses the configured zone name.
    pub fn tz(&self) -> Result<Tz, ConfigModelError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigModelError::UnknownTimezone(self.timezone.clone()))
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            locale: default_locale(),
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

// --- Auth gate Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_admin_home")]
    pub admin_home: String,
    #[serde(default = "default_business_home")]
    pub business_home: String,
    #[serde(default = "default_customer_home")]
    pub customer_home: String,
    /// Upper bound for each session/profile round trip
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            admin_home: default_admin_home(),
            business_home: default_business_home(),
            customer_home: default_customer_home(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}
fn default_admin_home() -> String {
    "/admin".to_string()
}
fn default_business_home() -> String {
    "/business/dashboard".to_string()
}
fn default_customer_home() -> String {
    "/customer".to_string()
}
fn default_fetch_timeout_ms() -> u64 {
    5000
}

// --- Demo accounts ---
// Only read by the demo session directory; never consulted by the gate itself.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DemoUserConfig {
    pub token: String,
    pub id: String,
    pub email: String,
    pub role: String,
    pub display_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// When false the session resolves but the profile lookup fails
    #[serde(default = "default_true")]
    pub has_profile: bool,
}

fn default_true() -> bool {
    true
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub demo_users: Vec<DemoUserConfig>,
}
