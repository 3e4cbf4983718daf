//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod locations;

use axum::Router;
use axum::routing::get;

use inventory_app::ports::{DeviceRepository, EventStore, LocationRepository};

use crate::state::AppState;

/// Build the `/inventory/v1` sub-router.
pub fn routes<DR, LR, ES>() -> Router<AppState<DR, LR, ES>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route(
            "/devices",
            get(devices::list::<DR, LR, ES>).post(devices::create::<DR, LR, ES>),
        )
        .route(
            "/devices/by-name/{name}",
            get(devices::get_by_name::<DR, LR, ES>),
        )
        .route(
            "/devices/{id}",
            get(devices::get::<DR, LR, ES>)
                .put(devices::update::<DR, LR, ES>)
                .delete(devices::delete::<DR, LR, ES>),
        )
        .route("/devices/{id}/history", get(devices::history::<DR, LR, ES>))
        // Locations
        .route(
            "/locations",
            get(locations::list::<DR, LR, ES>).post(locations::create::<DR, LR, ES>),
        )
        .route(
            "/locations/by-name/{name}",
            get(locations::get_by_name::<DR, LR, ES>),
        )
        .route(
            "/locations/{id}",
            get(locations::get::<DR, LR, ES>)
                .put(locations::update::<DR, LR, ES>)
                .delete(locations::delete::<DR, LR, ES>),
        )
        .route(
            "/locations/{id}/history",
            get(locations::history::<DR, LR, ES>),
        )
        .route(
            "/locations/{id}/device",
            get(locations::occupant::<DR, LR, ES>)
                .put(locations::install::<DR, LR, ES>)
                .delete(locations::remove::<DR, LR, ES>),
        )
        // Events
        .route(
            "/events",
            get(events::list::<DR, LR, ES>).post(events::create::<DR, LR, ES>),
        )
        .route("/events/{id}", get(events::get::<DR, LR, ES>))
}
