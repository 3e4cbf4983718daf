//! Event service: explicit creation and lookup of audit events.

use inventory_domain::error::{InventoryError, NotFoundError};
use inventory_domain::event::Event;
use inventory_domain::id::EventId;

use crate::ports::EventStore;

/// Application service for recording events outside of install/remove.
pub struct EventService<S> {
    store: S,
}

impl<S: EventStore> EventService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append an event to the audit log.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] when `source` or `type` is
    /// blank, or [`InventoryError::Conflict`] if the supplied id is taken.
    #[tracing::instrument(skip(self, event), fields(event_type = %event.event_type))]
    pub fn record_event(&self, event: Event) -> Result<Event, InventoryError> {
        event.validate()?;
        self.store.create(event)
    }

    /// Look up an event by id.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when no event with `id` exists.
    pub fn get_event(&self, id: &EventId) -> Result<Event, InventoryError> {
        self.store.get_by_id(id)?.ok_or_else(|| {
            NotFoundError::Id {
                entity: "Event",
                id: id.to_string(),
            }
            .into()
        })
    }
}
