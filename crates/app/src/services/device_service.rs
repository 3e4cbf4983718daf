//! Device service: use-cases for managing devices.

use inventory_domain::device::Device;
use inventory_domain::error::{ConflictError, InventoryError, NotFoundError};
use inventory_domain::id::DeviceId;

use crate::ports::DeviceRepository;
use crate::services::WriteLock;

/// Application service for device CRUD operations.
///
/// Occupancy (`current_location_id`) is never changed here; only the
/// [`BindingService`](crate::services::binding_service::BindingService) moves
/// devices in and out of locations.
pub struct DeviceService<R> {
    repo: R,
    lock: WriteLock,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            lock: WriteLock::default(),
        }
    }

    /// Serialize updates and deletes with the holders of `lock`.
    #[must_use]
    pub fn with_lock(mut self, lock: WriteLock) -> Self {
        self.lock = lock;
        self
    }

    /// Create a new device after validating domain invariants.
    ///
    /// Any occupancy carried by the request is discarded: a new device is
    /// never installed anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] if invariants fail, or
    /// [`InventoryError::Conflict`] if the supplied identifier is taken.
    #[tracing::instrument(skip(self, device), fields(device_name = %device.name))]
    pub fn create_device(&self, mut device: Device) -> Result<Device, InventoryError> {
        device.validate()?;
        device.current_location_id = None;
        let created = self.repo.create(device)?;
        tracing::info!(device_id = %created.id, "device created");
        Ok(created)
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when no device with `id` exists.
    pub fn get_device(&self, id: &DeviceId) -> Result<Device, InventoryError> {
        self.repo.get_by_id(id)?.ok_or_else(|| {
            NotFoundError::Id {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up the first device carrying `name`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when no device has that name.
    pub fn find_device_by_name(&self, name: &str) -> Result<Device, InventoryError> {
        self.repo.get_by_name(name)?.ok_or_else(|| {
            NotFoundError::Name {
                entity: "Device",
                name: name.to_owned(),
            }
            .into()
        })
    }

    /// Replace the mutable fields of an existing device.
    ///
    /// The stored occupancy wins over whatever the patch carries.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] if invariants fail, or
    /// [`InventoryError::NotFound`] when the device does not exist.
    #[tracing::instrument(skip(self, patch))]
    pub fn update_device(
        &self,
        id: &DeviceId,
        mut patch: Device,
    ) -> Result<Device, InventoryError> {
        patch.validate()?;
        let _guard = self.lock.acquire();
        let existing = self.get_device(id)?;
        patch.current_location_id = existing.current_location_id;
        self.repo.update(id, patch)
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when the device does not exist,
    /// or [`InventoryError::Conflict`] while it is still installed.
    #[tracing::instrument(skip(self))]
    pub fn delete_device(&self, id: &DeviceId) -> Result<(), InventoryError> {
        let _guard = self.lock.acquire();
        let existing = self.get_device(id)?;
        if let Some(location_id) = existing.current_location_id {
            return Err(ConflictError::DeviceInstalled {
                device_id: id.to_string(),
                location_id: location_id.to_string(),
            }
            .into());
        }
        self.repo.delete(id)?;
        tracing::info!("device deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::InMemoryDeviceRepo;
    use inventory_domain::error::ValidationError;
    use inventory_domain::id::LocationId;
    use inventory_domain::time::now;

    fn make_service() -> DeviceService<InMemoryDeviceRepo> {
        DeviceService::new(InMemoryDeviceRepo::default())
    }

    fn valid_device() -> Device {
        Device::builder()
            .name("Node A")
            .component_type("Node")
            .manufacturer("HPE")
            .serial_number("SN-1")
            .status("active")
            .build()
            .unwrap()
    }

    #[test]
    fn should_assign_id_and_timestamp_when_created_without_id() {
        let svc = make_service();
        let before = now();

        let created = svc.create_device(valid_device()).unwrap();

        assert!(!created.id.is_unassigned());
        assert!(created.created_at >= before);
        assert!(created.created_at <= now());
        assert_eq!(svc.get_device(&created.id).unwrap().name, "Node A");
    }

    #[test]
    fn should_reject_create_when_name_is_empty() {
        let svc = make_service();
        let mut device = valid_device();
        device.name = String::new();

        let result = svc.create_device(device);
        assert!(matches!(
            result,
            Err(InventoryError::InvalidInput(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_duplicate_supplied_id() {
        let svc = make_service();
        let mut device = valid_device();
        device.id = DeviceId::new("node-a");
        svc.create_device(device.clone()).unwrap();

        let result = svc.create_device(device);
        assert!(matches!(result, Err(InventoryError::Conflict(_))));
    }

    #[test]
    fn should_discard_occupancy_on_create() {
        let svc = make_service();
        let mut device = valid_device();
        device.current_location_id = Some(LocationId::new("loc1"));

        let created = svc.create_device(device).unwrap();
        assert!(created.current_location_id.is_none());
    }

    #[test]
    fn should_find_device_by_name() {
        let svc = make_service();
        let created = svc.create_device(valid_device()).unwrap();

        let found = svc.find_device_by_name("Node A").unwrap();
        assert_eq!(found.id, created.id);

        let missing = svc.find_device_by_name("Node Z");
        assert!(matches!(
            missing,
            Err(InventoryError::NotFound(NotFoundError::Name { .. }))
        ));
    }

    #[test]
    fn should_preserve_identity_and_creation_time_on_update() {
        let svc = make_service();
        let created = svc.create_device(valid_device()).unwrap();

        let mut patch = valid_device();
        patch.name = "Node A (rev2)".to_string();
        patch.id = DeviceId::new("ignored");
        let saved = svc.update_device(&created.id, patch).unwrap();

        assert_eq!(saved.id, created.id);
        assert_eq!(saved.created_at, created.created_at);
        assert!(saved.updated_at.is_some());
        assert_eq!(saved.name, "Node A (rev2)");
    }

    #[test]
    fn should_return_not_found_when_updating_missing_device() {
        let svc = make_service();
        let result = svc.update_device(&DeviceId::new("ghost"), valid_device());
        assert!(matches!(result, Err(InventoryError::NotFound(_))));
    }

    #[test]
    fn should_return_not_found_after_delete() {
        let svc = make_service();
        let created = svc.create_device(valid_device()).unwrap();

        svc.delete_device(&created.id).unwrap();

        let result = svc.get_device(&created.id);
        assert!(matches!(result, Err(InventoryError::NotFound(_))));
    }

    #[test]
    fn should_return_not_found_when_deleting_missing_device() {
        let svc = make_service();
        let result = svc.delete_device(&DeviceId::new("ghost"));
        assert!(matches!(result, Err(InventoryError::NotFound(_))));
    }
}
