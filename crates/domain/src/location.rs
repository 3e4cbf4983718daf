//! Location: a physical slot or bay that holds at most one device.

use serde::{Deserialize, Serialize};

use crate::Properties;
use crate::error::{InventoryError, ValidationError};
use crate::id::{DeviceId, LocationId};
use crate::time::Timestamp;

/// Status of a location holding a device.
pub const STATUS_OCCUPIED: &str = "occupied";

/// Status of a location with nothing installed.
pub const STATUS_EMPTY: &str = "empty";

/// A physical slot that may hold at most one [`Device`](crate::device::Device).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub id: LocationId,
    pub name: String,
    #[serde(default)]
    pub location_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_location_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children_location_ids: Vec<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_device_id: Option<DeviceId>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

impl Location {
    /// Create a builder for constructing a [`Location`].
    #[must_use]
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.current_device_id.is_some()
    }

    /// Bind `device_id` to this location and mark it occupied.
    pub fn occupy(&mut self, device_id: DeviceId) {
        self.current_device_id = Some(device_id);
        STATUS_OCCUPIED.clone_into(&mut self.status);
    }

    /// Clear the binding and mark the location empty, returning the device
    /// that was bound.
    pub fn vacate(&mut self) -> Option<DeviceId> {
        STATUS_EMPTY.clone_into(&mut self.status);
        self.current_device_id.take()
    }

    /// Occupancy snapshot recorded in audit events.
    #[must_use]
    pub fn occupancy_snapshot(&self) -> Properties {
        let mut snapshot = Properties::new();
        snapshot.insert("status".into(), self.status.clone().into());
        snapshot.insert(
            "currentDeviceId".into(),
            self.current_device_id
                .as_ref()
                .map_or(serde_json::Value::Null, |id| id.as_str().into()),
        );
        snapshot
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] when `name` is empty.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Location`].
#[derive(Debug, Default)]
pub struct LocationBuilder {
    id: Option<LocationId>,
    name: Option<String>,
    location_type: Option<String>,
    parent_location_id: Option<LocationId>,
    status: Option<String>,
    properties: Properties,
}

impl LocationBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<LocationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn location_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_type = Some(location_type.into());
        self
    }

    #[must_use]
    pub fn parent_location_id(mut self, parent: impl Into<LocationId>) -> Self {
        self.parent_location_id = Some(parent.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Consume the builder, validate, and return a [`Location`].
    ///
    /// Status defaults to [`STATUS_EMPTY`].
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] if `name` is missing or empty.
    pub fn build(self) -> Result<Location, InventoryError> {
        let location = Location {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            location_type: self.location_type.unwrap_or_default(),
            parent_location_id: self.parent_location_id,
            children_location_ids: Vec::new(),
            current_device_id: None,
            status: self.status.unwrap_or_else(|| STATUS_EMPTY.to_owned()),
            properties: self.properties,
            created_at: Timestamp::default(),
            updated_at: None,
            deleted_at: None,
        };
        location.validate()?;
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_empty_location_by_default() {
        let location = Location::builder()
            .id("test-slot-1")
            .name("Test Slot")
            .location_type("node_slot")
            .build()
            .unwrap();
        assert_eq!(location.status, STATUS_EMPTY);
        assert!(!location.is_occupied());
    }

    #[test]
    fn should_return_validation_error_when_name_is_missing() {
        let result = Location::builder().location_type("bay").build();
        assert!(matches!(
            result,
            Err(InventoryError::InvalidInput(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_toggle_status_when_occupied_and_vacated() {
        let mut location = Location::builder().name("Slot").build().unwrap();
        location.occupy(DeviceId::new("d1"));
        assert_eq!(location.status, STATUS_OCCUPIED);
        assert_eq!(location.current_device_id, Some(DeviceId::new("d1")));

        let previous = location.vacate();
        assert_eq!(previous, Some(DeviceId::new("d1")));
        assert_eq!(location.status, STATUS_EMPTY);
        assert!(location.current_device_id.is_none());
    }

    #[test]
    fn should_snapshot_occupancy() {
        let mut location = Location::builder().name("Slot").build().unwrap();
        let before = location.occupancy_snapshot();
        assert_eq!(before["status"], "empty");
        assert!(before["currentDeviceId"].is_null());

        location.occupy(DeviceId::new("d1"));
        let after = location.occupancy_snapshot();
        assert_eq!(after["status"], "occupied");
        assert_eq!(after["currentDeviceId"], "d1");
    }

    #[test]
    fn should_decode_client_supplied_id() {
        let json = r#"{"id":"test-slot-1","name":"Test Slot","locationType":"node_slot","status":"empty"}"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(location.id.as_str(), "test-slot-1");
        assert_eq!(location.location_type, "node_slot");
    }
}
