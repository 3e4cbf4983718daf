//! Query service: read-only listings and history.
//!
//! Results are wrapped in a [`Page`] carrying a trivial pagination summary
//! (everything is returned in one page).

use serde::Serialize;

use inventory_domain::device::Device;
use inventory_domain::error::InventoryError;
use inventory_domain::event::Event;
use inventory_domain::id::{DeviceId, LocationId};
use inventory_domain::location::Location;

use crate::ports::{DeviceRepository, EventStore, LocationRepository};

/// Pagination summary returned alongside list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub count: usize,
    pub total: usize,
    pub offset: usize,
}

/// A list result with its pagination summary.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Wrap a complete result set as a single page.
    #[must_use]
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len();
        Self {
            items,
            pagination: Pagination {
                count: total,
                total,
                offset: 0,
            },
        }
    }
}

/// Read-side façade over the three repositories. Holds no state of its own.
pub struct QueryService<DR, LR, ES> {
    devices: DR,
    locations: LR,
    events: ES,
}

impl<DR, LR, ES> QueryService<DR, LR, ES>
where
    DR: DeviceRepository,
    LR: LocationRepository,
    ES: EventStore,
{
    pub fn new(devices: DR, locations: LR, events: ES) -> Self {
        Self {
            devices,
            locations,
            events,
        }
    }

    /// All devices, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates storage faults.
    pub fn list_devices(&self) -> Result<Page<Device>, InventoryError> {
        let mut devices = self.devices.get_all()?;
        devices.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(Page::single(devices))
    }

    /// All locations, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates storage faults.
    pub fn list_locations(&self) -> Result<Page<Location>, InventoryError> {
        let mut locations = self.locations.get_all()?;
        locations.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(Page::single(locations))
    }

    /// All events in chronological order.
    ///
    /// # Errors
    ///
    /// Propagates storage faults.
    pub fn list_events(&self) -> Result<Page<Event>, InventoryError> {
        Ok(chronological(self.events.get_all()?))
    }

    /// Events referencing `device_id`, oldest first. The device itself need
    /// not exist any more.
    ///
    /// # Errors
    ///
    /// Propagates storage faults.
    pub fn device_history(&self, device_id: &DeviceId) -> Result<Page<Event>, InventoryError> {
        Ok(chronological(self.events.find_by_device(device_id)?))
    }

    /// Events referencing `location_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates storage faults.
    pub fn location_history(
        &self,
        location_id: &LocationId,
    ) -> Result<Page<Event>, InventoryError> {
        Ok(chronological(self.events.find_by_location(location_id)?))
    }
}

fn chronological(mut events: Vec<Event>) -> Page<Event> {
    events.sort_by_key(|event| event.time);
    Page::single(events)
}
