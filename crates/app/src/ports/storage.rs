//! Storage port: repository traits for devices and locations.
//!
//! Implementations own identity assignment and timestamps: `create` assigns
//! an identifier when the incoming one is unassigned and stamps `created_at`,
//! `update` preserves both and stamps `updated_at`.

use std::sync::Arc;

use inventory_domain::device::Device;
use inventory_domain::error::InventoryError;
use inventory_domain::id::{DeviceId, LocationId};
use inventory_domain::location::Location;

/// Repository for persisting and querying [`Device`]s.
pub trait DeviceRepository {
    /// Insert a new device.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Conflict`] when the identifier is taken.
    fn create(&self, device: Device) -> Result<Device, InventoryError>;

    /// Get a device by its unique identifier.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn get_by_id(&self, id: &DeviceId) -> Result<Option<Device>, InventoryError>;

    /// Get the first device whose name matches. Names are not unique.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn get_by_name(&self, name: &str) -> Result<Option<Device>, InventoryError>;

    /// Get all devices, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn get_all(&self) -> Result<Vec<Device>, InventoryError>;

    /// Overwrite the mutable fields of an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when `id` is absent.
    fn update(&self, id: &DeviceId, device: Device) -> Result<Device, InventoryError>;

    /// Permanently remove a device.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when `id` is absent.
    fn delete(&self, id: &DeviceId) -> Result<(), InventoryError>;
}

/// Repository for persisting and querying [`Location`]s.
pub trait LocationRepository {
    /// Insert a new location.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Conflict`] when the identifier is taken.
    fn create(&self, location: Location) -> Result<Location, InventoryError>;

    /// Get a location by its unique identifier.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn get_by_id(&self, id: &LocationId) -> Result<Option<Location>, InventoryError>;

    /// Get the first location whose name matches. Names are not unique.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn get_by_name(&self, name: &str) -> Result<Option<Location>, InventoryError>;

    /// Get all locations, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns a storage fault as [`InventoryError::Internal`].
    fn get_all(&self) -> Result<Vec<Location>, InventoryError>;

    /// Overwrite the mutable fields of an existing location.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when `id` is absent.
    fn update(&self, id: &LocationId, location: Location) -> Result<Location, InventoryError>;

    /// Permanently remove a location.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when `id` is absent.
    fn delete(&self, id: &LocationId) -> Result<(), InventoryError>;
}

impl<T: DeviceRepository + ?Sized> DeviceRepository for Arc<T> {
    fn create(&self, device: Device) -> Result<Device, InventoryError> {
        (**self).create(device)
    }

    fn get_by_id(&self, id: &DeviceId) -> Result<Option<Device>, InventoryError> {
        (**self).get_by_id(id)
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Device>, InventoryError> {
        (**self).get_by_name(name)
    }

    fn get_all(&self) -> Result<Vec<Device>, InventoryError> {
        (**self).get_all()
    }

    fn update(&self, id: &DeviceId, device: Device) -> Result<Device, InventoryError> {
        (**self).update(id, device)
    }

    fn delete(&self, id: &DeviceId) -> Result<(), InventoryError> {
        (**self).delete(id)
    }
}

impl<T: LocationRepository + ?Sized> LocationRepository for Arc<T> {
    fn create(&self, location: Location) -> Result<Location, InventoryError> {
        (**self).create(location)
    }

    fn get_by_id(&self, id: &LocationId) -> Result<Option<Location>, InventoryError> {
        (**self).get_by_id(id)
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Location>, InventoryError> {
        (**self).get_by_name(name)
    }

    fn get_all(&self) -> Result<Vec<Location>, InventoryError> {
        (**self).get_all()
    }

    fn update(&self, id: &LocationId, location: Location) -> Result<Location, InventoryError> {
        (**self).update(id, location)
    }

    fn delete(&self, id: &LocationId) -> Result<(), InventoryError> {
        (**self).delete(id)
    }
}
