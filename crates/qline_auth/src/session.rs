//! The session and profile collaborators the gate reads from.

use async_trait::async_trait;
use qline_common::{PhoneValidator, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::role::Role;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed record: {0}")]
    Malformed(String),
}

/// The signed-in user as the session store reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "customer"))]
    pub role: Role,
    #[serde(default, alias = "full_name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Minimal profile for a signed-in user whose profile could not be read.
    /// Always the lowest privilege.
    pub fn fallback(session: &Session) -> Self {
        Self {
            id: session.user_id.clone(),
            email: session.email.clone(),
            role: Role::Customer,
            display_name: None,
            phone: None,
            avatar_url: None,
        }
    }

    /// The profile phone normalized by `validator`; `Ok(None)` when no phone is set.
    pub fn normalized_phone(
        &self,
        validator: &dyn PhoneValidator,
    ) -> Result<Option<String>, ValidationError> {
        self.phone
            .as_deref()
            .map(|raw| validator.normalize(raw))
            .transpose()
    }
}

/// Auth state notifications. Receivers re-read the session; the event itself
/// carries no authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The current session, `None` when nobody is signed in.
    async fn get_session(&self) -> Result<Option<Session>, StoreError>;

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `Ok(None)` when the user has no profile row.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use qline_common::KenyanPhoneValidator;

    fn profile(phone: Option<&str>) -> UserProfile {
        UserProfile {
            id: "u-1".into(),
            email: "wanjiru@example.com".into(),
            role: Role::Customer,
            display_name: Some("Wanjiru".into()),
            phone: phone.map(str::to_string),
            avatar_url: None,
        }
    }

    #[test]
    fn test_fallback_profile_is_customer() {
        let session = Session {
            user_id: "u-9".into(),
            email: "x@example.com".into(),
            access_token: "t".into(),
        };
        let fallback = UserProfile::fallback(&session);
        assert_eq!(fallback.role, Role::Customer);
        assert_eq!(fallback.id, "u-9");
        assert_eq!(fallback.display_name, None);
    }

    #[test]
    fn test_normalized_phone() {
        let validator = KenyanPhoneValidator;
        assert_eq!(
            profile(Some("0712 345 678")).normalized_phone(&validator),
            Ok(Some("+254712345678".into()))
        );
        assert_eq!(profile(None).normalized_phone(&validator), Ok(None));
        assert!(profile(Some("12")).normalized_phone(&validator).is_err());
    }

    #[test]
    fn test_profile_accepts_full_name_field() {
        let json = r#"{"id":"u-1","email":"a@b.c","role":"business","full_name":"Duka Ltd"}"#;
        let parsed: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.role, Role::Business);
        assert_eq!(parsed.display_name.as_deref(), Some("Duka Ltd"));
    }
}
