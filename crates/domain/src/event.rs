//! Event: an immutable audit record of something that happened.
//!
//! Events follow the `CloudEvents` 1.0 envelope: `id`, `source`,
//! `specversion`, `type`, optional `datacontenttype` and `subject`, `time`,
//! and an inventory [`EventData`] payload. Once stored they are
//! never mutated or deleted.

use serde::{Deserialize, Serialize};

use crate::Properties;
use crate::error::{InventoryError, ValidationError};
use crate::id::{DeviceId, EventId, LocationId};
use crate::time::Timestamp;

/// `CloudEvents` version stamped on every event.
pub const CLOUDEVENTS_VERSION: &str = "1.0";

/// Content type of the `data` payload.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A device was bound to a location.
pub const DEVICE_INSTALLED: &str = "device.installed";

/// A device was unbound from a location.
pub const DEVICE_REMOVED: &str = "device.removed";

/// An audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: EventId,
    pub source: String,
    #[serde(default = "default_specversion")]
    pub specversion: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(
        rename = "datacontenttype",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub time: Timestamp,
    #[serde(default)]
    pub data: EventData,
}

/// Inventory event payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Duration of the operation in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_before: Option<Properties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_after: Option<Properties>,
}

fn default_specversion() -> String {
    CLOUDEVENTS_VERSION.to_owned()
}

impl Event {
    /// Start building an event of the given type from the given source.
    #[must_use]
    pub fn builder(source: impl Into<String>, event_type: impl Into<String>) -> EventBuilder {
        EventBuilder {
            event: Self {
                id: EventId::default(),
                source: source.into(),
                specversion: default_specversion(),
                event_type: event_type.into(),
                data_content_type: None,
                subject: None,
                time: Timestamp::default(),
                data: EventData::default(),
            },
        }
    }

    /// Whether the event refers to `device_id`.
    #[must_use]
    pub fn concerns_device(&self, device_id: &DeviceId) -> bool {
        self.data.device_id.as_ref() == Some(device_id)
    }

    /// Whether the event refers to `location_id`.
    #[must_use]
    pub fn concerns_location(&self, location_id: &LocationId) -> bool {
        self.data.location_id.as_ref() == Some(location_id)
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] when `source` or `type` is empty.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.source.trim().is_empty() {
            return Err(ValidationError::EmptyField("source").into());
        }
        if self.event_type.trim().is_empty() {
            return Err(ValidationError::EmptyField("type").into());
        }
        Ok(())
    }
}

/// Builder for [`Event`]. Identifier and time are assigned by the store.
#[derive(Debug)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.event.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn json_content(mut self) -> Self {
        self.event.data_content_type = Some(CONTENT_TYPE_JSON.to_owned());
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.event.data.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn location_id(mut self, location_id: LocationId) -> Self {
        self.event.data.location_id = Some(location_id);
        self
    }

    #[must_use]
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.event.data.actor = Some(actor.into());
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: Option<String>) -> Self {
        self.event.data.comment = comment;
        self
    }

    #[must_use]
    pub fn transition(mut self, before: Properties, after: Properties) -> Self {
        self.event.data.state_before = Some(before);
        self.event.data.state_after = Some(after);
        self
    }

    /// Consume the builder, validate, and return an [`Event`].
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] when `source` or `type` is empty.
    pub fn build(self) -> Result<Event, InventoryError> {
        self.event.validate()?;
        Ok(self.event)
    }
}
