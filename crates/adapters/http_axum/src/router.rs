//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use inventory_app::ports::{DeviceRepository, EventStore, LocationRepository};

use crate::state::AppState;

/// Path prefix of every API route.
pub const API_PREFIX: &str = "/inventory/v1";

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under [`API_PREFIX`] and exposes `/health` at the
/// root. Includes a [`TraceLayer`] that logs each HTTP request/response at
/// the `DEBUG` level using the `tracing` ecosystem.
pub fn build<DR, LR, ES>(state: AppState<DR, LR, ES>) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
