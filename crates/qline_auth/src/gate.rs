// --- File: crates/qline_auth/src/gate.rs ---
//! AuthGate: decides whether the current user may see a page and, when not,
//! where to send them.
//!
//! The check is two sequential round trips (session, then profile), each
//! bounded by the policy's fetch timeout. Anything that goes wrong on the
//! session side fails closed to the login route. A profile that cannot be read
//! degrades the user to `Customer` instead of locking them out.

use std::sync::Arc;
use std::time::Duration;

use qline_config::AuthConfig;
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::mount::MountToken;
use crate::navigator::Navigator;
use crate::role::{Role, RoleRoutes};
use crate::session::{ProfileStore, Session, SessionStore, UserProfile};

/// Why a check did not authorize (or, for `ProfileLookupFailed`, why it
/// authorized with reduced privilege). Never surfaced as a page error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("No active session")]
    SessionUnavailable,
    #[error("Profile lookup failed: {0}")]
    ProfileLookupFailed(String),
    #[error("Role '{0}' is not allowed here")]
    RoleUnauthorized(Role),
    #[error("Timed out fetching {0}")]
    Timeout(&'static str),
    #[error("Auth store error: {0}")]
    Store(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPolicy {
    pub routes: RoleRoutes,
    pub fetch_timeout: Duration,
}

impl AuthPolicy {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            routes: RoleRoutes::from_config(config),
            fetch_timeout: Duration::from_millis(config.fetch_timeout_ms),
        }
    }
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Authorized(UserProfile),
    Unauthorized {
        redirect_target: String,
        reason: GateError,
    },
}

impl AuthDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthDecision::Authorized(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthDecision::Authorized(user) => Some(user),
            AuthDecision::Unauthorized { .. } => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            AuthDecision::Authorized(_) => None,
            AuthDecision::Unauthorized {
                redirect_target, ..
            } => Some(redirect_target),
        }
    }
}

/// How a [`AuthGate::guard`] run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The navigator was told to leave the page.
    Redirected { target: String, reason: GateError },
    /// The page went away first. Nothing was navigated after that point.
    Unmounted,
}

#[derive(Clone)]
pub struct AuthGate {
    sessions: Arc<dyn SessionStore>,
    profiles: Arc<dyn ProfileStore>,
    policy: AuthPolicy,
}

impl AuthGate {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        profiles: Arc<dyn ProfileStore>,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            sessions,
            profiles,
            policy,
        }
    }

    /// Sends signed-out and failed checks to `path` instead of the configured
    /// login route.
    pub fn with_redirect_to(mut self, path: impl Into<String>) -> Self {
        self.policy.routes.login = path.into();
        self
    }

    pub fn policy(&self) -> &AuthPolicy {
        &self.policy
    }

    /// Runs one check against `allowed`. An empty `allowed` admits any
    /// signed-in user.
    pub async fn authorize(&self, allowed: &[Role]) -> AuthDecision {
        let session = match self.fetch_session().await {
            Ok(session) => session,
            Err(reason) => {
                debug!("Session check failed: {}", reason);
                return self.login_redirect(reason);
            }
        };

        let profile = match self.fetch_profile(&session).await {
            Ok(profile) => profile,
            Err(reason @ GateError::Timeout(_)) => {
                warn!(user_id = %session.user_id, "{}", reason);
                return self.login_redirect(reason);
            }
            Err(reason) => {
                warn!(
                    user_id = %session.user_id,
                    "{}; continuing as customer", reason
                );
                UserProfile::fallback(&session)
            }
        };

        if allowed.is_empty() || allowed.contains(&profile.role) {
            debug!(user_id = %profile.id, role = %profile.role, "Authorized");
            return AuthDecision::Authorized(profile);
        }

        let redirect_target = self.policy.routes.home_for(&profile.role).to_string();
        info!(
            user_id = %profile.id,
            role = %profile.role,
            "Role not allowed, redirecting to {}", redirect_target
        );
        AuthDecision::Unauthorized {
            redirect_target,
            reason: GateError::RoleUnauthorized(profile.role),
        }
    }

    /// [`authorize`](Self::authorize) tied to a page mount. Returns `None`
    /// when the page unmounted before the decision was reached; in-flight
    /// fetches are dropped at that point.
    pub async fn check(&self, allowed: &[Role], mount: &MountToken) -> Option<AuthDecision> {
        tokio::select! {
            biased;
            _ = mount.unmounted() => {
                debug!(mount_id = %mount.id(), "Auth check abandoned");
                None
            }
            decision = self.authorize(allowed) => mount.is_mounted().then_some(decision),
        }
    }

    /// Guards a page for as long as it stays mounted.
    ///
    /// Checks once, then again after every auth state change. Each authorized
    /// result is passed to `on_authorized`; the first unauthorized result is
    /// sent to `navigator` and ends the guard. No redirect happens once
    /// `mount` reports the page is gone.
    pub async fn guard<N, F>(
        &self,
        allowed: &[Role],
        mount: MountToken,
        navigator: &N,
        mut on_authorized: F,
    ) -> GuardOutcome
    where
        N: Navigator + ?Sized,
        F: FnMut(&UserProfile) + Send,
    {
        // Subscribe first so a change during the initial check is not missed
        let mut events = self.sessions.subscribe();

        loop {
            let Some(decision) = self.check(allowed, &mount).await else {
                return GuardOutcome::Unmounted;
            };

            match decision {
                AuthDecision::Authorized(user) => on_authorized(&user),
                AuthDecision::Unauthorized {
                    redirect_target,
                    reason,
                } => {
                    if !mount.is_mounted() {
                        return GuardOutcome::Unmounted;
                    }
                    info!(mount_id = %mount.id(), "Redirecting to {} ({})", redirect_target, reason);
                    navigator.redirect(&redirect_target);
                    return GuardOutcome::Redirected {
                        target: redirect_target,
                        reason,
                    };
                }
            }

            tokio::select! {
                biased;
                _ = mount.unmounted() => return GuardOutcome::Unmounted,
                event = events.recv() => match event {
                    Ok(event) => debug!("Auth state changed ({:?}), re-checking", event),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("Missed {} auth events, re-checking", skipped)
                    }
                    Err(RecvError::Closed) => {
                        // No more changes can arrive; the last decision stands
                        mount.unmounted().await;
                        return GuardOutcome::Unmounted;
                    }
                },
            }
        }
    }

    async fn fetch_session(&self) -> Result<Session, GateError> {
        match timeout(self.policy.fetch_timeout, self.sessions.get_session()).await {
            Err(_) => Err(GateError::Timeout("session")),
            Ok(Err(e)) => Err(GateError::Store(e.to_string())),
            Ok(Ok(None)) => Err(GateError::SessionUnavailable),
            Ok(Ok(Some(session))) => Ok(session),
        }
    }

    async fn fetch_profile(&self, session: &Session) -> Result<UserProfile, GateError> {
        match timeout(
            self.policy.fetch_timeout,
            self.profiles.get_profile(&session.user_id),
        )
        .await
        {
            Err(_) => Err(GateError::Timeout("profile")),
            Ok(Err(e)) => Err(GateError::ProfileLookupFailed(e.to_string())),
            Ok(Ok(None)) => Err(GateError::ProfileLookupFailed(format!(
                "no profile for user {}",
                session.user_id
            ))),
            Ok(Ok(Some(profile))) => Ok(profile),
        }
    }

    fn login_redirect(&self, reason: GateError) -> AuthDecision {
        AuthDecision::Unauthorized {
            redirect_target: self.policy.routes.login.clone(),
            reason,
        }
    }
}
