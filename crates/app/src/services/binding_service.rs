//! Binding service: the only path that installs or removes a device.
//!
//! A binding is the pair `Location.current_device_id == D` and
//! `Device.current_location_id == L`. Install and remove write the location,
//! then the device, then append an audit event. The three containers are
//! locked independently, so a concurrent reader may briefly see the location
//! updated before the device. Install and remove themselves are serialized on
//! a [`WriteLock`], so two bindings never interleave their writes; entity
//! services given the same lock (see [`BindingService::write_lock`]) also
//! serialize their updates and deletes with it.
//!
//! Nothing is rolled back: once validation passes the writes are not expected
//! to fail.

use serde::Serialize;

use inventory_domain::device::Device;
use inventory_domain::error::{ConflictError, InternalError, InventoryError, NotFoundError};
use inventory_domain::event::{DEVICE_INSTALLED, DEVICE_REMOVED, Event};
use inventory_domain::id::{DeviceId, LocationId};
use inventory_domain::location::Location;

use crate::ports::{DeviceRepository, EventStore, LocationRepository};
use crate::services::WriteLock;

/// Default `source` attribute of binding events.
pub const DEFAULT_SOURCE: &str = "/inventory/v1/api";

/// Default actor recorded when the caller does not name one.
pub const DEFAULT_ACTOR: &str = "api-user";

/// Static attributes stamped on every binding event.
#[derive(Debug, Clone)]
pub struct BindingSettings {
    pub source: String,
    pub default_actor: String,
}

impl Default for BindingSettings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_owned(),
            default_actor: DEFAULT_ACTOR.to_owned(),
        }
    }
}

/// Who performed a transition and why. Both optional.
#[derive(Debug, Clone, Default)]
pub struct Attribution {
    pub actor: Option<String>,
    pub comment: Option<String>,
}

/// Outcome of an install or remove: the location as stored and the audit event.
#[derive(Debug, Clone, Serialize)]
pub struct Binding {
    pub location: Location,
    pub event: Event,
}

/// Orchestrates install/remove across devices, locations, and events.
pub struct BindingService<DR, LR, ES> {
    devices: DR,
    locations: LR,
    events: ES,
    settings: BindingSettings,
    lock: WriteLock,
}

impl<DR, LR, ES> BindingService<DR, LR, ES>
where
    DR: DeviceRepository,
    LR: LocationRepository,
    ES: EventStore,
{
    /// Create a new engine over the given repositories.
    pub fn new(devices: DR, locations: LR, events: ES, settings: BindingSettings) -> Self {
        Self {
            devices,
            locations,
            events,
            settings,
            lock: WriteLock::default(),
        }
    }

    /// The lock install/remove hold. Hand it to the entity services so their
    /// updates and deletes serialize with bindings.
    #[must_use]
    pub fn write_lock(&self) -> WriteLock {
        self.lock.clone()
    }

    /// Install `device_id` into `location_id`.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::NotFound`] if the location or the device is absent.
    /// - [`InventoryError::Conflict`] if the location is already occupied or
    ///   the device is already installed elsewhere.
    #[tracing::instrument(skip(self, attribution))]
    pub fn install(
        &self,
        location_id: &LocationId,
        device_id: &DeviceId,
        attribution: Attribution,
    ) -> Result<Binding, InventoryError> {
        let _guard = self.lock.acquire();

        let mut location = self.require_location(location_id)?;
        if let Some(occupant) = &location.current_device_id {
            tracing::warn!(%occupant, "install rejected: location occupied");
            return Err(ConflictError::LocationOccupied {
                location_id: location_id.to_string(),
                device_id: occupant.to_string(),
            }
            .into());
        }

        let mut device = self.require_device(device_id)?;
        if let Some(elsewhere) = &device.current_location_id {
            tracing::warn!(%elsewhere, "install rejected: device already installed");
            return Err(ConflictError::DeviceInstalled {
                device_id: device_id.to_string(),
                location_id: elsewhere.to_string(),
            }
            .into());
        }

        let before = location.occupancy_snapshot();
        location.occupy(device.id.clone());
        let after = location.occupancy_snapshot();
        let location = self.locations.update(location_id, location)?;

        device.current_location_id = Some(location.id.clone());
        self.devices.update(device_id, device)?;

        let event = self.record(
            DEVICE_INSTALLED,
            &location.id,
            device_id,
            attribution,
            before,
            after,
        )?;
        tracing::info!(event_id = %event.id, "device installed");
        Ok(Binding { location, event })
    }

    /// Remove whatever device occupies `location_id`.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::NotFound`] if the location is absent.
    /// - [`InventoryError::Conflict`] if the location is already empty.
    /// - [`InventoryError::Internal`] if the location references a device
    ///   that no longer exists.
    #[tracing::instrument(skip(self, attribution))]
    pub fn remove(
        &self,
        location_id: &LocationId,
        attribution: Attribution,
    ) -> Result<Binding, InventoryError> {
        let _guard = self.lock.acquire();

        let mut location = self.require_location(location_id)?;
        let Some(device_id) = location.current_device_id.clone() else {
            tracing::warn!("remove rejected: location already empty");
            return Err(ConflictError::LocationEmpty {
                location_id: location_id.to_string(),
            }
            .into());
        };
        let mut device = self.require_occupant(location_id, &device_id)?;

        let before = location.occupancy_snapshot();
        location.vacate();
        let after = location.occupancy_snapshot();
        let location = self.locations.update(location_id, location)?;

        device.current_location_id = None;
        self.devices.update(&device_id, device)?;

        let event = self.record(
            DEVICE_REMOVED,
            &location.id,
            &device_id,
            attribution,
            before,
            after,
        )?;
        tracing::info!(%device_id, event_id = %event.id, "device removed");
        Ok(Binding { location, event })
    }

    /// Return the device installed at `location_id`.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::NotFound`] if the location is absent or empty.
    /// - [`InventoryError::Internal`] if the referenced device no longer exists.
    pub fn occupant(&self, location_id: &LocationId) -> Result<Device, InventoryError> {
        let location = self.require_location(location_id)?;
        let Some(device_id) = location.current_device_id else {
            return Err(NotFoundError::Vacant {
                location_id: location_id.to_string(),
            }
            .into());
        };
        self.require_occupant(location_id, &device_id)
    }

    fn record(
        &self,
        event_type: &str,
        location_id: &LocationId,
        device_id: &DeviceId,
        attribution: Attribution,
        before: inventory_domain::Properties,
        after: inventory_domain::Properties,
    ) -> Result<Event, InventoryError> {
        let actor = attribution
            .actor
            .filter(|actor| !actor.trim().is_empty())
            .unwrap_or_else(|| self.settings.default_actor.clone());
        let event = Event::builder(self.settings.source.as_str(), event_type)
            .json_content()
            .subject(location_id.as_str())
            .device_id(device_id.clone())
            .location_id(location_id.clone())
            .actor(actor)
            .comment(attribution.comment)
            .transition(before, after)
            .build()?;
        self.events.create(event)
    }

    fn require_location(&self, id: &LocationId) -> Result<Location, InventoryError> {
        self.locations.get_by_id(id)?.ok_or_else(|| {
            NotFoundError::Id {
                entity: "Location",
                id: id.to_string(),
            }
            .into()
        })
    }

    fn require_device(&self, id: &DeviceId) -> Result<Device, InventoryError> {
        self.devices.get_by_id(id)?.ok_or_else(|| {
            NotFoundError::Id {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    fn require_occupant(
        &self,
        location_id: &LocationId,
        device_id: &DeviceId,
    ) -> Result<Device, InventoryError> {
        self.devices.get_by_id(device_id)?.ok_or_else(|| {
            tracing::error!(%location_id, %device_id, "location references a missing device");
            InternalError::DanglingDevice {
                location_id: location_id.to_string(),
                device_id: device_id.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::fakes::{InMemoryDeviceRepo, InMemoryEventStore, InMemoryLocationRepo};
    use inventory_domain::location::{STATUS_EMPTY, STATUS_OCCUPIED};

    struct Fixture {
        devices: Arc<InMemoryDeviceRepo>,
        locations: Arc<InMemoryLocationRepo>,
        events: Arc<InMemoryEventStore>,
        engine: BindingService<
            Arc<InMemoryDeviceRepo>,
            Arc<InMemoryLocationRepo>,
            Arc<InMemoryEventStore>,
        >,
    }

    fn fixture() -> Fixture {
        let devices = Arc::new(InMemoryDeviceRepo::default());
        let locations = Arc::new(InMemoryLocationRepo::default());
        let events = Arc::new(InMemoryEventStore::default());
        let engine = BindingService::new(
            Arc::clone(&devices),
            Arc::clone(&locations),
            Arc::clone(&events),
            BindingSettings::default(),
        );
        Fixture {
            devices,
            locations,
            events,
            engine,
        }
    }

    impl Fixture {
        fn device(&self, name: &str) -> Device {
            let device = Device::builder().name(name).status("active").build();
            self.devices.create(device.unwrap()).unwrap()
        }

        fn location(&self, id: &str) -> Location {
            self.locations
                .create(Location::builder().id(id).name(id).build().unwrap())
                .unwrap()
        }

        fn stored_device(&self, id: &DeviceId) -> Device {
            self.devices.get_by_id(id).unwrap().unwrap()
        }

        fn stored_location(&self, id: &LocationId) -> Location {
            self.locations.get_by_id(id).unwrap().unwrap()
        }
    }

    #[test]
    fn should_bind_both_sides_on_install() {
        let fx = fixture();
        let d1 = fx.device("Node A");
        let loc1 = fx.location("loc1");

        let binding = fx
            .engine
            .install(&loc1.id, &d1.id, Attribution::default())
            .unwrap();

        assert_eq!(binding.location.current_device_id, Some(d1.id.clone()));
        assert_eq!(binding.location.status, STATUS_OCCUPIED);
        assert!(binding.event.event_type.ends_with("installed"));
        assert_eq!(binding.event.data.actor.as_deref(), Some(DEFAULT_ACTOR));
        assert_eq!(binding.event.subject.as_deref(), Some("loc1"));
        assert_eq!(
            fx.stored_device(&d1.id).current_location_id,
            Some(loc1.id.clone())
        );
    }

    #[test]
    fn should_record_transition_snapshots() {
        let fx = fixture();
        let d1 = fx.device("Node A");
        let loc1 = fx.location("loc1");

        let binding = fx
            .engine
            .install(&loc1.id, &d1.id, Attribution::default())
            .unwrap();

        let before = binding.event.data.state_before.unwrap();
        let after = binding.event.data.state_after.unwrap();
        assert_eq!(before["status"], STATUS_EMPTY);
        assert_eq!(after["status"], STATUS_OCCUPIED);
        assert_eq!(after["currentDeviceId"], d1.id.as_str());
    }

    #[test]
    fn should_reject_install_into_occupied_location_without_side_effects() {
        let fx = fixture();
        let d1 = fx.device("Node A");
        let d2 = fx.device("Node B");
        let loc1 = fx.location("loc1");
        fx.engine
            .install(&loc1.id, &d1.id, Attribution::default())
            .unwrap();
        let location_before = fx.stored_location(&loc1.id);

        let result = fx.engine.install(&loc1.id, &d2.id, Attribution::default());

        assert!(matches!(
            result,
            Err(InventoryError::Conflict(
                ConflictError::LocationOccupied { .. },
            ))
        ));
        assert_eq!(fx.stored_location(&loc1.id), location_before);
        assert!(fx.stored_device(&d2.id).current_location_id.is_none());
        assert_eq!(fx.events.count(), 1);
    }

    #[test]
    fn should_reject_install_of_device_already_installed_elsewhere() {
        let fx = fixture();
        let d1 = fx.device("Node A");
        let loc1 = fx.location("loc1");
        let loc2 = fx.location("loc2");
        fx.engine
            .install(&loc1.id, &d1.id, Attribution::default())
            .unwrap();

        let result = fx.engine.install(&loc2.id, &d1.id, Attribution::default());

        assert!(matches!(
            result,
            Err(InventoryError::Conflict(
                ConflictError::DeviceInstalled { .. },
            ))
        ));
        assert!(!fx.stored_location(&loc2.id).is_occupied());
        assert_eq!(fx.events.count(), 1);
    }

    #[test]
    fn should_return_not_found_for_missing_location_or_device() {
        let fx = fixture();
        let d1 = fx.device("Node A");
        let loc1 = fx.location("loc1");

        let missing_location =
            fx.engine
                .install(&LocationId::new("nowhere"), &d1.id, Attribution::default());
        assert!(matches!(missing_location, Err(InventoryError::NotFound(_))));

        let missing_device =
            fx.engine
                .install(&loc1.id, &DeviceId::new("ghost"), Attribution::default());
        assert!(matches!(missing_device, Err(InventoryError::NotFound(_))));
        assert!(!fx.stored_location(&loc1.id).is_occupied());
        assert_eq!(fx.events.count(), 0);
    }

    #[test]
    fn should_restore_occupancy_after_install_then_remove() {
        let fx = fixture();
        let d1 = fx.device("Node A");
        let loc1 = fx.location("loc1");

        fx.engine
            .install(&loc1.id, &d1.id, Attribution::default())
            .unwrap();
        let binding = fx
            .engine
            .remove(
                &loc1.id,
                Attribution {
                    actor: Some("tech-7".into()),
                    comment: Some("RMA".into()),
                },
            )
            .unwrap();

        assert!(binding.location.current_device_id.is_none());
        assert_eq!(binding.location.status, STATUS_EMPTY);
        assert!(binding.event.event_type.ends_with("removed"));
        assert_eq!(binding.event.data.actor.as_deref(), Some("tech-7"));
        assert_eq!(binding.event.data.comment.as_deref(), Some("RMA"));
        assert!(fx.stored_device(&d1.id).current_location_id.is_none());
        assert_eq!(fx.events.count(), 2);
    }

    #[test]
    fn should_reject_remove_from_empty_location() {
        let fx = fixture();
        let loc1 = fx.location("loc1");

        let result = fx.engine.remove(&loc1.id, Attribution::default());

        assert!(matches!(
            result,
            Err(InventoryError::Conflict(
                ConflictError::LocationEmpty { .. },
            ))
        ));
        assert_eq!(fx.stored_location(&loc1.id), loc1);
        assert_eq!(fx.events.count(), 0);
    }

    #[test]
    fn should_report_internal_error_when_occupant_vanished() {
        let fx = fixture();
        let d1 = fx.device("Node A");
        let loc1 = fx.location("loc1");
        fx.engine
            .install(&loc1.id, &d1.id, Attribution::default())
            .unwrap();
        fx.devices.forget(&d1.id);

        let removed = fx.engine.remove(&loc1.id, Attribution::default());
        assert!(matches!(
            removed,
            Err(InventoryError::Internal(
                InternalError::DanglingDevice { .. },
            ))
        ));

        let occupant = fx.engine.occupant(&loc1.id);
        assert!(matches!(occupant, Err(InventoryError::Internal(_))));
    }

    #[test]
    fn should_return_occupant_or_vacant_not_found() {
        let fx = fixture();
        let d1 = fx.device("Node A");
        let loc1 = fx.location("loc1");

        assert!(matches!(
            fx.engine.occupant(&loc1.id),
            Err(InventoryError::NotFound(NotFoundError::Vacant { .. }))
        ));

        fx.engine
            .install(&loc1.id, &d1.id, Attribution::default())
            .unwrap();
        assert_eq!(fx.engine.occupant(&loc1.id).unwrap().id, d1.id);
    }

    #[test]
    fn should_admit_exactly_one_of_concurrent_installs() {
        let fx = fixture();
        let loc1 = fx.location("loc1");
        let devices: Vec<Device> = (0..8).map(|i| fx.device(&format!("Node {i}"))).collect();

        let successes: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = devices
                .iter()
                .map(|device| {
                    let engine = &fx.engine;
                    let location_id = &loc1.id;
                    scope.spawn(move || {
                        engine
                            .install(location_id, &device.id, Attribution::default())
                            .is_ok()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| usize::from(h.join().unwrap()))
                .sum()
        });

        assert_eq!(successes, 1);
        assert_eq!(fx.events.count(), 1);
        let occupant = fx.stored_location(&loc1.id).current_device_id.unwrap();
        let installed: Vec<_> = devices
            .iter()
            .filter(|d| fx.stored_device(&d.id).current_location_id.is_some())
            .collect();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].id, occupant);
    }
}
