//! # inventory-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository`: CRUD for devices
//!   - `LocationRepository`: CRUD for locations
//!   - `EventStore`: append & query audit events
//!   - `Clock` / `IdGenerator`: time and identity collaborators
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService`, `LocationService`, `EventService`: entity CRUD
//!   - `BindingService`: install/remove devices, keeping both sides of the
//!     binding symmetric and recording an audit event per transition
//!   - `QueryService`: listings and history with a pagination summary
//!
//! ## Dependency rule
//! Depends on `inventory-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
