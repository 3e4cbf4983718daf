//! In-memory implementation of [`LocationRepository`].

use std::sync::Arc;

use inventory_app::ports::{Clock, IdGenerator, LocationRepository};
use inventory_domain::error::InventoryError;
use inventory_domain::id::LocationId;
use inventory_domain::location::Location;

use crate::table::Table;

/// Location container guarded by its own reader/writer lock.
pub struct MemoryLocationRepository {
    table: Table<Location>,
}

impl MemoryLocationRepository {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            table: Table::new(clock, ids),
        }
    }
}

impl LocationRepository for MemoryLocationRepository {
    fn create(&self, location: Location) -> Result<Location, InventoryError> {
        self.table.insert(location)
    }

    fn get_by_id(&self, id: &LocationId) -> Result<Option<Location>, InventoryError> {
        self.table.get(id)
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Location>, InventoryError> {
        self.table.find_by_name(name)
    }

    fn get_all(&self) -> Result<Vec<Location>, InventoryError> {
        self.table.all()
    }

    fn update(&self, id: &LocationId, location: Location) -> Result<Location, InventoryError> {
        self.table.replace(id, location)
    }

    fn delete(&self, id: &LocationId) -> Result<(), InventoryError> {
        self.table.remove(id)
    }
}
