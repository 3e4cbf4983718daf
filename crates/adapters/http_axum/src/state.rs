//! Shared application state for axum handlers.

use std::sync::Arc;

use inventory_app::ports::{DeviceRepository, EventStore, LocationRepository};
use inventory_app::services::binding_service::{BindingService, BindingSettings};
use inventory_app::services::device_service::DeviceService;
use inventory_app::services::event_service::EventService;
use inventory_app::services::location_service::LocationService;
use inventory_app::services::query_service::QueryService;

/// Application state shared across all axum handlers.
///
/// Generic over the three repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repositories themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<DR, LR, ES> {
    /// Device CRUD service.
    pub device_service: Arc<DeviceService<DR>>,
    /// Location CRUD service.
    pub location_service: Arc<LocationService<LR>>,
    /// Explicit event recording and lookup.
    pub event_service: Arc<EventService<ES>>,
    /// Install / remove / occupant.
    pub binding_service: Arc<BindingService<DR, LR, ES>>,
    /// Listings and history.
    pub query_service: Arc<QueryService<DR, LR, ES>>,
}

impl<DR, LR, ES> Clone for AppState<DR, LR, ES> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            location_service: Arc::clone(&self.location_service),
            event_service: Arc::clone(&self.event_service),
            binding_service: Arc::clone(&self.binding_service),
            query_service: Arc::clone(&self.query_service),
        }
    }
}

impl<DR, LR, ES> AppState<DR, LR, ES>
where
    DR: DeviceRepository + Clone + Send + Sync + 'static,
    LR: LocationRepository + Clone + Send + Sync + 'static,
    ES: EventStore + Clone + Send + Sync + 'static,
{
    /// Wire every service over the same set of repository handles.
    ///
    /// The handles are cloned into each service, so they should be cheap
    /// shared references (typically `Arc<…>`).
    ///
    /// Device and location updates/deletes share the binding engine's write
    /// lock.
    pub fn new(devices: DR, locations: LR, events: ES, settings: BindingSettings) -> Self {
        let binding_service =
            BindingService::new(devices.clone(), locations.clone(), events.clone(), settings);
        let lock = binding_service.write_lock();
        Self {
            device_service: Arc::new(DeviceService::new(devices.clone()).with_lock(lock.clone())),
            location_service: Arc::new(LocationService::new(locations.clone()).with_lock(lock)),
            event_service: Arc::new(EventService::new(events.clone())),
            binding_service: Arc::new(binding_service),
            query_service: Arc::new(QueryService::new(devices, locations, events)),
        }
    }
}
