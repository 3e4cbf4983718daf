//! Location service: use-cases for managing locations.

use inventory_domain::error::{ConflictError, InventoryError, NotFoundError};
use inventory_domain::id::LocationId;
use inventory_domain::location::{Location, STATUS_EMPTY, STATUS_OCCUPIED};

use crate::ports::LocationRepository;
use crate::services::WriteLock;

/// Application service for location CRUD operations.
pub struct LocationService<R> {
    repo: R,
    lock: WriteLock,
}

impl<R: LocationRepository> LocationService<R> {
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

    /// Create a new, empty location.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] if invariants fail, or
    /// [`InventoryError::Conflict`] if the supplied identifier is taken.
    #[tracing::instrument(skip(self, location), fields(location_name = %location.name))]
    pub fn create_location(&self, mut location: Location) -> Result<Location, InventoryError> {
        location.validate()?;
        location.current_device_id = None;
        if location.status.is_empty() || location.status == STATUS_OCCUPIED {
            STATUS_EMPTY.clone_into(&mut location.status);
        }
        let created = self.repo.create(location)?;
        tracing::info!(location_id = %created.id, "location created");
        Ok(created)
    }

    /// Look up a location by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when no location with `id` exists.
    pub fn get_location(&self, id: &LocationId) -> Result<Location, InventoryError> {
        self.repo.get_by_id(id)?.ok_or_else(|| {
            NotFoundError::Id {
                entity: "Location",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up the first location carrying `name`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when no location has that name.
    pub fn find_location_by_name(&self, name: &str) -> Result<Location, InventoryError> {
        self.repo.get_by_name(name)?.ok_or_else(|| {
            NotFoundError::Name {
                entity: "Location",
                name: name.to_owned(),
            }
            .into()
        })
    }

    /// Replace the mutable fields of an existing location.
    ///
    /// Occupancy and the matching status are kept from storage.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] if invariants fail, or
    /// [`InventoryError::NotFound`] when the location does not exist.
    #[tracing::instrument(skip(self, patch))]
    pub fn update_location(
        &self,
        id: &LocationId,
        mut patch: Location,
    ) -> Result<Location, InventoryError> {
        patch.validate()?;
        let _guard = self.lock.acquire();
        let existing = self.get_location(id)?;
        patch.current_device_id = existing.current_device_id;
        if patch.is_occupied() {
            patch.status = existing.status;
        } else if patch.status.is_empty() || patch.status == STATUS_OCCUPIED {
            STATUS_EMPTY.clone_into(&mut patch.status);
        }
        self.repo.update(id, patch)
    }

    /// Delete a location by id.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when the location does not exist,
    /// or [`InventoryError::Conflict`] while a device is installed in it.
    #[tracing::instrument(skip(self))]
    pub fn delete_location(&self, id: &LocationId) -> Result<(), InventoryError> {
        let _guard = self.lock.acquire();
        let existing = self.get_location(id)?;
        if let Some(device_id) = existing.current_device_id {
            return Err(ConflictError::LocationOccupied {
                location_id: id.to_string(),
                device_id: device_id.to_string(),
            }
            .into());
        }
        self.repo.delete(id)?;
        tracing::info!("location deleted");
        Ok(())
    }
}
