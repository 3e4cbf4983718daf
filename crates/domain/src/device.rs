//! Device: a physical hardware unit tracked by the inventory.

use serde::{Deserialize, Serialize};

use crate::Properties;
use crate::error::{InventoryError, ValidationError};
use crate::id::{DeviceId, LocationId};
use crate::time::Timestamp;

/// A physical piece of hardware (node, blade, PSU, …).
///
/// `current_location_id` is owned by the binding engine: it is set if and
/// only if exactly one [`Location`](crate::location::Location) points back
/// at this device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub id: DeviceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default)]
    pub component_type: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location_id: Option<LocationId>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_device_id: Option<DeviceId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children_device_ids: Vec<DeviceId>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Whether the device currently occupies a location.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.current_location_id.is_some()
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

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    hostname: Option<String>,
    component_type: Option<String>,
    manufacturer: Option<String>,
    part_number: Option<String>,
    serial_number: Option<String>,
    status: Option<String>,
    properties: Properties,
    parent_device_id: Option<DeviceId>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<DeviceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    #[must_use]
    pub fn component_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = Some(component_type.into());
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    #[must_use]
    pub fn part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = Some(part_number.into());
        self
    }

    #[must_use]
    pub fn serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
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

    #[must_use]
    pub fn parent_device_id(mut self, parent: impl Into<DeviceId>) -> Self {
        self.parent_device_id = Some(parent.into());
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// The identifier stays unassigned unless [`id`](Self::id) was called;
    /// the store assigns one on create.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] if `name` is missing or empty.
    pub fn build(self) -> Result<Device, InventoryError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            hostname: self.hostname,
            component_type: self.component_type.unwrap_or_default(),
            manufacturer: self.manufacturer.unwrap_or_default(),
            part_number: self.part_number.unwrap_or_default(),
            serial_number: self.serial_number.unwrap_or_default(),
            current_location_id: None,
            status: self.status.unwrap_or_default(),
            properties: self.properties,
            parent_device_id: self.parent_device_id,
            children_device_ids: Vec::new(),
            created_at: Timestamp::default(),
            updated_at: None,
            deleted_at: None,
        };
        device.validate()?;
        Ok(device)
    }
}
