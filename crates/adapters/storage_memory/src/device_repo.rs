//! In-memory implementation of [`DeviceRepository`].

use std::sync::Arc;

use inventory_app::ports::{Clock, DeviceRepository, IdGenerator};
use inventory_domain::device::Device;
use inventory_domain::error::InventoryError;
use inventory_domain::id::DeviceId;

use crate::table::Table;

/// Device container guarded by its own reader/writer lock.
pub struct MemoryDeviceRepository {
    table: Table<Device>,
}

impl MemoryDeviceRepository {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            table: Table::new(clock, ids),
        }
    }
}

impl DeviceRepository for MemoryDeviceRepository {
    fn create(&self, device: Device) -> Result<Device, InventoryError> {
        self.table.insert(device)
    }

    fn get_by_id(&self, id: &DeviceId) -> Result<Option<Device>, InventoryError> {
        self.table.get(id)
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Device>, InventoryError> {
        self.table.find_by_name(name)
    }

    fn get_all(&self) -> Result<Vec<Device>, InventoryError> {
        self.table.all()
    }

    fn update(&self, id: &DeviceId, device: Device) -> Result<Device, InventoryError> {
        self.table.replace(id, device)
    }

    fn delete(&self, id: &DeviceId) -> Result<(), InventoryError> {
        self.table.remove(id)
    }
}
