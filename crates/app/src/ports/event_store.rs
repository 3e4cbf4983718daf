//! Event store port: append-only persistence for audit events.

use std::sync::Arc;

use inventory_domain::error::InventoryError;
use inventory_domain::event::Event;
use inventory_domain::id::{DeviceId, EventId, LocationId};

/// Append-only repository for [`Event`]s. There is no update or delete.
///
/// Implementations assign the identifier when unassigned and stamp `time`
/// so that timestamps strictly increase in creation order.
pub trait EventStore {
    /// Append a new event.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Conflict`] when the identifier is taken.
    fn create(&self, event: Event) -> Result<Event, InventoryError>;

    /// Get an event by its unique identifier.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn get_by_id(&self, id: &EventId) -> Result<Option<Event>, InventoryError>;

    /// Get all events in storage order.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn get_all(&self) -> Result<Vec<Event>, InventoryError>;

    /// Find events whose payload references `device_id`, in storage order.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn find_by_device(&self, device_id: &DeviceId) -> Result<Vec<Event>, InventoryError>;

    /// Find events whose payload references `location_id`, in storage order.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn find_by_location(&self, location_id: &LocationId) -> Result<Vec<Event>, InventoryError>;
}

impl<T: EventStore + ?Sized> EventStore for Arc<T> {
    fn create(&self, event: Event) -> Result<Event, InventoryError> {
        (**self).create(event)
    }

    fn get_by_id(&self, id: &EventId) -> Result<Option<Event>, InventoryError> {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> Result<Vec<Event>, InventoryError> {
        (**self).get_all()
    }

    fn find_by_device(&self, device_id: &DeviceId) -> Result<Vec<Event>, InventoryError> {
        (**self).find_by_device(device_id)
    }

    fn find_by_location(&self, location_id: &LocationId) -> Result<Vec<Event>, InventoryError> {
        (**self).find_by_location(location_id)
    }
}
