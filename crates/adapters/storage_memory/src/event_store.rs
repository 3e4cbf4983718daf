//! In-memory implementation of [`EventStore`].
//!
//! The log is append-only: there is no update or delete. Entries are kept in
//! insertion order next to an id index, and each new entry's `time` is forced
//! strictly after the previous one so insertion order and time order agree.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use inventory_app::ports::{Clock, EventStore, IdGenerator};
use inventory_domain::error::{ConflictError, InternalError, InventoryError};
use inventory_domain::event::Event;
use inventory_domain::id::{DeviceId, EventId, LocationId};
use inventory_domain::time;

#[derive(Default)]
struct EventLog {
    entries: Vec<Event>,
    index: HashMap<EventId, usize>,
}

/// Append-only event container guarded by its own reader/writer lock.
pub struct MemoryEventStore {
    log: RwLock<EventLog>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl MemoryEventStore {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            log: RwLock::new(EventLog::default()),
            clock,
            ids,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, EventLog>, InventoryError> {
        self.log
            .read()
            .map_err(|_| InternalError::LockPoisoned("Event").into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, EventLog>, InventoryError> {
        self.log
            .write()
            .map_err(|_| InternalError::LockPoisoned("Event").into())
    }

    fn select(&self, keep: impl Fn(&Event) -> bool) -> Result<Vec<Event>, InventoryError> {
        Ok(self
            .read()?
            .entries
            .iter()
            .filter(|event| keep(event))
            .cloned()
            .collect())
    }
}

impl EventStore for MemoryEventStore {
    fn create(&self, mut event: Event) -> Result<Event, InventoryError> {
        if event.id.is_unassigned() {
            event.id = EventId::new(self.ids.generate());
        }
        let mut log = self.write()?;
        if log.index.contains_key(&event.id) {
            return Err(ConflictError::DuplicateId {
                entity: "Event",
                id: event.id.to_string(),
            }
            .into());
        }
        let previous = log.entries.last().map(|last| last.time);
        event.time = time::strictly_after(self.clock.now(), previous);

        let position = log.entries.len();
        log.index.insert(event.id.clone(), position);
        log.entries.push(event.clone());
        tracing::debug!(id = %event.id, event_type = %event.event_type, "event appended");
        Ok(event)
    }

    fn get_by_id(&self, id: &EventId) -> Result<Option<Event>, InventoryError> {
        let log = self.read()?;
        Ok(log
            .index
            .get(id)
            .and_then(|&position| log.entries.get(position))
            .cloned())
    }

    fn get_all(&self) -> Result<Vec<Event>, InventoryError> {
        Ok(self.read()?.entries.clone())
    }

    fn find_by_device(&self, device_id: &DeviceId) -> Result<Vec<Event>, InventoryError> {
        self.select(|event| event.concerns_device(device_id))
    }

    fn find_by_location(&self, location_id: &LocationId) -> Result<Vec<Event>, InventoryError> {
        self.select(|event| event.concerns_location(location_id))
    }
}
