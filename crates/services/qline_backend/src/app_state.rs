use std::sync::Arc;

use qline_auth::{AuthPolicy, DemoDirectory};
use qline_calendar::DisplayConfig;
use qline_common::{KenyanPhoneValidator, PhoneValidator, QlineError};
use qline_config::AppConfig;
use tracing::info;

/// Shared state for every route.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Zone and language for calendar labels and for "today"
    pub display: DisplayConfig,
    pub auth_policy: AuthPolicy,
    pub directory: DemoDirectory,
    pub phone_validator: Arc<dyn PhoneValidator>,
}

impl AppState {
    /// Fails when the configured timezone is unknown.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, QlineError> {
        let display_config = DisplayConfig::from_config(&config.calendar)?;
        let auth_policy = AuthPolicy::from_config(&config.auth);
        let directory = DemoDirectory::from_config(&config.demo_users);
        info!(
            timezone = %display_config.timezone,
            demo_users = config.demo_users.len(),
            "Application state ready"
        );

        Ok(Self {
            config,
            display: display_config,
            auth_policy,
            directory,
            phone_validator: Arc::new(KenyanPhoneValidator),
        })
    }
}
