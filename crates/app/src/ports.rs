//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.
//!
//! Every port is synchronous: the core does map access and field copies only,
//! so nothing here ever needs to suspend.

pub mod clock;
pub mod event_store;
pub mod storage;

pub use clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
pub use event_store::EventStore;
pub use storage::{DeviceRepository, LocationRepository};
