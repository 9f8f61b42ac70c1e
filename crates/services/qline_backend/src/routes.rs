use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use qline_auth::Role;
use tower_http::trace::TraceLayer;
#[cfg(feature = "openapi")]
use tracing::info;

use crate::app_state::AppState;
use crate::auth_middleware::{auth_gate_middleware, GateState, Refusal};
use crate::handlers::{
    admin_page_handler, api_not_found_handler, business_dashboard_handler, customer_page_handler,
    get_calendar_handler, group_slots_handler, me_handler, navigate_handler,
};

/// Everything under `/api`.
pub fn routes(state: AppState) -> Router {
    let guard = |allowed: Vec<Role>, refusal: Refusal| {
        middleware::from_fn_with_state(
            GateState::new(state.clone(), allowed).with_refusal(refusal),
            auth_gate_middleware,
        )
    };

    let admin = Router::new()
        .route("/admin", get(admin_page_handler))
        .route_layer(guard(vec![Role::Admin], Refusal::Redirect));
    let business = Router::new()
        .route("/business/dashboard", get(business_dashboard_handler))
        .route_layer(guard(vec![Role::Business], Refusal::Redirect));
    let customer = Router::new()
        .route("/customer", get(customer_page_handler))
        .route_layer(guard(vec![Role::Customer], Refusal::Redirect));
    let me = Router::new()
        .route("/me", get(me_handler))
        .route_layer(guard(Vec::new(), Refusal::JsonError));

    Router::new()
        .route("/calendar", get(get_calendar_handler))
        .route("/calendar/navigate", post(navigate_handler))
        .route("/slots/group", post(group_slots_handler))
        .merge(admin)
        .merge(business)
        .merge(customer)
        .merge(me)
        .fallback(api_not_found_handler)
        .with_state(state)
}

pub fn app(state: AppState) -> Router {
    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new()
        .route("/", get(|| async { "Welcome to the qline API!" }))
        .nest("/api", routes(state));

    #[cfg(feature = "openapi")]
    {
        use crate::doc::QlineApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /docs");
        app = app.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", QlineApiDoc::openapi()));
    }

    app.layer(TraceLayer::new_for_http())
}
