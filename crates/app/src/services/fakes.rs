//! Minimal in-test repositories shared by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use inventory_domain::device::Device;
use inventory_domain::error::{ConflictError, InventoryError, NotFoundError};
use inventory_domain::event::Event;
use inventory_domain::id::{DeviceId, EventId, LocationId};
use inventory_domain::location::Location;
use inventory_domain::time::{now, strictly_after};

use crate::ports::{DeviceRepository, EventStore, LocationRepository};

fn next_id(prefix: &str, seq: &AtomicUsize) -> String {
    format!("{prefix}-{}", seq.fetch_add(1, Ordering::SeqCst) + 1)
}

#[derive(Default)]
pub struct InMemoryDeviceRepo {
    store: Mutex<HashMap<DeviceId, Device>>,
    seq: AtomicUsize,
}

impl InMemoryDeviceRepo {
    /// Drop a device behind the services' back to simulate corruption.
    pub fn forget(&self, id: &DeviceId) {
        self.store.lock().unwrap().remove(id);
    }
}

impl DeviceRepository for InMemoryDeviceRepo {
    fn create(&self, mut device: Device) -> Result<Device, InventoryError> {
        if device.id.is_unassigned() {
            device.id = DeviceId::new(next_id("device", &self.seq));
        }
        let mut store = self.store.lock().unwrap();
        if store.contains_key(&device.id) {
            return Err(ConflictError::DuplicateId {
                entity: "Device",
                id: device.id.to_string(),
            }
            .into());
        }
        device.created_at = now();
        store.insert(device.id.clone(), device.clone());
        Ok(device)
    }

    fn get_by_id(&self, id: &DeviceId) -> Result<Option<Device>, InventoryError> {
        Ok(self.store.lock().unwrap().get(id).cloned())
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Device>, InventoryError> {
        let store = self.store.lock().unwrap();
        Ok(store.values().find(|d| d.name == name).cloned())
    }

    fn get_all(&self) -> Result<Vec<Device>, InventoryError> {
        Ok(self.store.lock().unwrap().values().cloned().collect())
    }

    fn update(&self, id: &DeviceId, mut device: Device) -> Result<Device, InventoryError> {
        let mut store = self.store.lock().unwrap();
        let existing = store.get(id).ok_or_else(|| NotFoundError::Id {
            entity: "Device",
            id: id.to_string(),
        })?;
        device.id = id.clone();
        device.created_at = existing.created_at;
        device.updated_at = Some(now());
        store.insert(id.clone(), device.clone());
        Ok(device)
    }

    fn delete(&self, id: &DeviceId) -> Result<(), InventoryError> {
        self.store
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| {
                NotFoundError::Id {
                    entity: "Device",
                    id: id.to_string(),
                }
                .into()
            })
    }
}

#[derive(Default)]
pub struct InMemoryLocationRepo {
    store: Mutex<HashMap<LocationId, Location>>,
    seq: AtomicUsize,
}

impl LocationRepository for InMemoryLocationRepo {
    fn create(&self, mut location: Location) -> Result<Location, InventoryError> {
        if location.id.is_unassigned() {
            location.id = LocationId::new(next_id("location", &self.seq));
        }
        let mut store = self.store.lock().unwrap();
        if store.contains_key(&location.id) {
            return Err(ConflictError::DuplicateId {
                entity: "Location",
                id: location.id.to_string(),
            }
            .into());
        }
        location.created_at = now();
        store.insert(location.id.clone(), location.clone());
        Ok(location)
    }

    fn get_by_id(&self, id: &LocationId) -> Result<Option<Location>, InventoryError> {
        Ok(self.store.lock().unwrap().get(id).cloned())
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Location>, InventoryError> {
        let store = self.store.lock().unwrap();
        Ok(store.values().find(|l| l.name == name).cloned())
    }

    fn get_all(&self) -> Result<Vec<Location>, InventoryError> {
        Ok(self.store.lock().unwrap().values().cloned().collect())
    }

    fn update(&self, id: &LocationId, mut location: Location) -> Result<Location, InventoryError> {
        let mut store = self.store.lock().unwrap();
        let existing = store.get(id).ok_or_else(|| NotFoundError::Id {
            entity: "Location",
            id: id.to_string(),
        })?;
        location.id = id.clone();
        location.created_at = existing.created_at;
        location.updated_at = Some(now());
        store.insert(id.clone(), location.clone());
        Ok(location)
    }

    fn delete(&self, id: &LocationId) -> Result<(), InventoryError> {
        self.store
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| {
                NotFoundError::Id {
                    entity: "Location",
                    id: id.to_string(),
                }
                .into()
            })
    }
}

#[derive(Default)]
pub struct InMemoryEventStore {
    log: Mutex<Vec<Event>>,
    seq: AtomicUsize,
}

impl InMemoryEventStore {
    pub fn count(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

impl EventStore for InMemoryEventStore {
    fn create(&self, mut event: Event) -> Result<Event, InventoryError> {
        if event.id.is_unassigned() {
            event.id = EventId::new(next_id("event", &self.seq));
        }
        let mut log = self.log.lock().unwrap();
        event.time = strictly_after(now(), log.last().map(|e| e.time));
        log.push(event.clone());
        Ok(event)
    }

    fn get_by_id(&self, id: &EventId) -> Result<Option<Event>, InventoryError> {
        let log = self.log.lock().unwrap();
        Ok(log.iter().find(|e| &e.id == id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Event>, InventoryError> {
        Ok(self.log.lock().unwrap().clone())
    }

    fn find_by_device(&self, device_id: &DeviceId) -> Result<Vec<Event>, InventoryError> {
        let log = self.log.lock().unwrap();
        Ok(log
            .iter()
            .filter(|e| e.concerns_device(device_id))
            .cloned()
            .collect())
    }

    fn find_by_location(&self, location_id: &LocationId) -> Result<Vec<Event>, InventoryError> {
        let log = self.log.lock().unwrap();
        Ok(log
            .iter()
            .filter(|e| e.concerns_location(location_id))
            .cloned()
            .collect())
    }
}
