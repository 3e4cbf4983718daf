//! Bundle of the three containers sharing one clock and id generator.

use std::sync::Arc;

use inventory_app::ports::{Clock, IdGenerator, SystemClock, UuidGenerator};

use crate::{MemoryDeviceRepository, MemoryEventStore, MemoryLocationRepository};

/// The whole in-memory entity store.
///
/// Each handle is reference-counted so the same containers can be shared by
/// every service that needs them.
#[derive(Clone)]
pub struct MemoryStore {
    devices: Arc<MemoryDeviceRepository>,
    locations: Arc<MemoryLocationRepository>,
    events: Arc<MemoryEventStore>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            devices: Arc::new(MemoryDeviceRepository::new(
                Arc::clone(&clock),
                Arc::clone(&ids),
            )),
            locations: Arc::new(MemoryLocationRepository::new(
                Arc::clone(&clock),
                Arc::clone(&ids),
            )),
            events: Arc::new(MemoryEventStore::new(clock, ids)),
        }
    }

    #[must_use]
    pub fn devices(&self) -> Arc<MemoryDeviceRepository> {
        Arc::clone(&self.devices)
    }

    #[must_use]
    pub fn locations(&self) -> Arc<MemoryLocationRepository> {
        Arc::clone(&self.locations)
    }

    #[must_use]
    pub fn events(&self) -> Arc<MemoryEventStore> {
        Arc::clone(&self.events)
    }
}

impl Default for MemoryStore {
    /// Wall-clock timestamps and random UUID identifiers.
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}
