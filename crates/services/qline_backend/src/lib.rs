pub mod app_state;
pub mod auth_middleware;
pub mod doc;
pub mod handlers;
pub mod routes;
#[cfg(test)]
mod routes_test;

pub use app_state::AppState;
pub use routes::{app, routes};
