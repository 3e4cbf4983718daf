//! # inventory-adapter-storage-memory
//!
//! Process-memory persistence adapter.
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `inventory-app::ports`
//! - Own identity assignment (via an injected `IdGenerator`) and timestamps
//!   (via an injected `Clock`)
//! - Guard each container (devices, locations, events) with its own
//!   reader/writer lock; the three are never locked jointly
//!
//! All state is lost when the process exits.
//!
//! ## Dependency rule
//! Depends on `inventory-app` (for port traits) and `inventory-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

mod device_repo;
mod event_store;
mod location_repo;
mod store;
mod table;

pub use device_repo::MemoryDeviceRepository;
pub use event_store::MemoryEventStore;
pub use location_repo::MemoryLocationRepository;
pub use store::MemoryStore;
