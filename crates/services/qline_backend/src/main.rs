// File: services/qline_backend/src/main.rs
use std::sync::Arc;

use qline_backend::{app, AppState};
use qline_common::{config_error, log_error, log_result, logging, Context};
use qline_config::load_config;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = log_result(
        load_config().map_err(config_error),
        "Configuration loaded",
        "Startup aborted",
    )?;
    let config = Arc::new(config);
    let state = AppState::from_config(config.clone())?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(e) = axum::serve(listener, app(state).into_make_service()).await {
        log_error(&e, "Server stopped");
        return Err(e.into());
    }
    Ok(())
}
