//! Time and identity collaborators consumed by storage adapters.

use inventory_domain::time::{self, Timestamp};

/// Source of the current time, called on every create and update.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Source of globally unique identifiers, called once per entity creation.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Wall-clock UTC time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        time::now()
    }
}

/// Random v4 UUIDs rendered in hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
