//! Common error types used across the workspace.
//!
//! Each failure kind has its own typed error which converts into
//! [`InventoryError`] via `#[from]`. Callers match on the outer variant to
//! decide how to report the failure (e.g. the HTTP status code).

/// Top-level error returned by every store, service, and engine operation.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The operation collides with current state.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// An invariant was found broken. Never expected under correct operation.
    #[error(transparent)]
    Internal(#[from] InternalError),

    /// The request data is structurally incomplete or malformed.
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
}

/// Lookup failures.
#[derive(Debug, thiserror::Error)]
pub enum NotFoundError {
    #[error("{entity} with id {id} not found")]
    Id { entity: &'static str, id: String },

    #[error("{entity} with name '{name}' not found")]
    Name { entity: &'static str, name: String },

    #[error("no device at location {location_id}")]
    Vacant { location_id: String },
}

/// Collisions with existing state.
#[derive(Debug, thiserror::Error)]
pub enum ConflictError {
    #[error("{entity} with id {id} already exists")]
    DuplicateId { entity: &'static str, id: String },

    #[error("location {location_id} is already occupied by device {device_id}")]
    LocationOccupied {
        location_id: String,
        device_id: String,
    },

    #[error("location {location_id} is already empty")]
    LocationEmpty { location_id: String },

    #[error("device {device_id} is already installed at location {location_id}")]
    DeviceInstalled {
        device_id: String,
        location_id: String,
    },
}

/// Broken invariants and storage faults.
#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    #[error("data inconsistency: location {location_id} references missing device {device_id}")]
    DanglingDevice {
        location_id: String,
        device_id: String,
    },

    #[error("{0} store lock poisoned")]
    LockPoisoned(&'static str),
}

/// Structural validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}
