//! In-memory session and profile stores built from `[[demo_users]]` config.
//!
//! Each bearer token maps to one account. The directory is a value, not a
//! global: the backend builds one at start-up and tests build their own.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use qline_config::DemoUserConfig;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::role::Role;
use crate::session::{AuthEvent, ProfileStore, Session, SessionStore, StoreError, UserProfile};

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct DemoDirectory {
    sessions: Arc<HashMap<String, Session>>,
    profiles: Arc<DemoProfileStore>,
}

impl DemoDirectory {
    pub fn from_config(users: &[DemoUserConfig]) -> Self {
        let mut sessions = HashMap::new();
        let mut profiles = HashMap::new();

        for user in users {
            sessions.insert(
                user.token.clone(),
                Session {
                    user_id: user.id.clone(),
                    email: user.email.clone(),
                    access_token: user.token.clone(),
                },
            );
            if user.has_profile {
                profiles.insert(
                    user.id.clone(),
                    UserProfile {
                        id: user.id.clone(),
                        email: user.email.clone(),
                        role: Role::from(user.role.as_str()),
                        display_name: Some(user.display_name.clone()),
                        phone: user.phone.clone(),
                        avatar_url: None,
                    },
                );
            }
        }
        debug!(
            "Demo directory: {} accounts, {} profiles",
            sessions.len(),
            profiles.len()
        );

        Self {
            sessions: Arc::new(sessions),
            profiles: Arc::new(DemoProfileStore { profiles }),
        }
    }

    /// Session store for whoever presented `token`. Unknown or missing
    /// tokens give a signed-out store. Every store has its own event
    /// channel, so changes are only seen by guards built on that store.
    pub fn session_store(&self, token: Option<&str>) -> DemoSessionStore {
        let session = token.and_then(|token| self.sessions.get(token)).cloned();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        DemoSessionStore {
            session: Arc::new(RwLock::new(session)),
            events,
        }
    }

    pub fn profile_store(&self) -> Arc<DemoProfileStore> {
        self.profiles.clone()
    }

    pub fn session_for_token(&self, token: &str) -> Option<&Session> {
        self.sessions.get(token)
    }
}

/// One browser's view of the session. Cloning shares the same session slot.
#[derive(Debug, Clone)]
pub struct DemoSessionStore {
    session: Arc<RwLock<Option<Session>>>,
    events: broadcast::Sender<AuthEvent>,
}

impl DemoSessionStore {
    /// Replaces the session and notifies subscribers.
    pub async fn set_session(&self, session: Option<Session>) {
        let event = if session.is_some() {
            AuthEvent::SignedIn
        } else {
            AuthEvent::SignedOut
        };
        *self.session.write().await = session;
        if self.events.send(event).is_err() {
            debug!("No subscribers for {:?}", event);
        }
    }

    pub async fn sign_out(&self) {
        self.set_session(None).await;
    }
}

#[async_trait]
impl SessionStore for DemoSessionStore {
    async fn get_session(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.session.read().await.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

#[derive(Debug, Default)]
pub struct DemoProfileStore {
    profiles: HashMap<String, UserProfile>,
}

#[async_trait]
impl ProfileStore for DemoProfileStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.get(user_id).cloned())
    }
}
