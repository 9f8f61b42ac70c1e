use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::{header::AUTHORIZATION, HeaderMap};
use qline_auth::{AuthDecision, AuthGate, GateError, Role};
use qline_common::QlineError;
use tracing::info;

use crate::app_state::AppState;

/// How a request the gate turns away is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// `303 See Other` to the redirect target. Used for page routes.
    Redirect,
    /// A JSON error body. Used for data routes.
    JsonError,
}

/// State for one guarded route group: the app plus the roles it admits.
#[derive(Clone)]
pub struct GateState {
    pub app: AppState,
    pub allowed: Arc<[Role]>,
    pub refusal: Refusal,
}

impl GateState {
    pub fn new(app: AppState, allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            app,
            allowed: allowed.into_iter().collect(),
            refusal: Refusal::Redirect,
        }
    }

    pub fn with_refusal(mut self, refusal: Refusal) -> Self {
        self.refusal = refusal;
        self
    }
}

/// Runs the AuthGate for the caller's bearer token. Authorized requests get
/// the [`UserProfile`](qline_auth::UserProfile) as an extension. Everyone else
/// is answered according to the group's [`Refusal`].
pub async fn auth_gate_middleware(
    State(gate_state): State<GateState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = bearer_token(req.headers()).map(str::to_string);
    let app = &gate_state.app;
    let gate = AuthGate::new(
        Arc::new(app.directory.session_store(token.as_deref())),
        app.directory.profile_store(),
        app.auth_policy.clone(),
    );

    match gate.authorize(&gate_state.allowed).await {
        AuthDecision::Authorized(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        AuthDecision::Unauthorized {
            redirect_target,
            reason,
        } => {
            info!(
                path = %req.uri().path(),
                "Refused ({:?}) with target {}: {}", gate_state.refusal, redirect_target, reason
            );
            match gate_state.refusal {
                Refusal::Redirect => Redirect::to(&redirect_target).into_response(),
                Refusal::JsonError => refusal_error(&reason).into_response(),
            }
        }
    }
}

/// Timeouts stay distinguishable from plain refusals.
fn refusal_error(reason: &GateError) -> QlineError {
    match reason {
        GateError::Timeout(_) => QlineError::TimeoutError(reason.to_string()),
        _ => QlineError::AuthError(reason.to_string()),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
