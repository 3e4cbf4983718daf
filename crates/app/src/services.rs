//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod binding_service;
pub mod device_service;
pub mod event_service;
pub mod location_service;
pub mod query_service;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(test)]
pub(crate) mod fakes;

/// Lock shared by every service that reads-then-writes binding fields, so an
/// update or delete never interleaves with an install or remove.
///
/// Clones share the same underlying mutex.
#[derive(Debug, Clone, Default)]
pub struct WriteLock(Arc<Mutex<()>>);

impl WriteLock {
    /// Block until no other holder is inside a binding-sensitive write.
    ///
    /// A poisoned mutex is recovered: the guarded data is `()`, so there is
    /// no partial state to observe.
    pub(crate) fn acquire(&self) -> MutexGuard<'_, ()> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
