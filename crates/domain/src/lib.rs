//! # inventory-domain
//!
//! Pure domain model for the hardware inventory.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (physical hardware units that can be installed)
//! - Define **Locations** (slots or bays that hold at most one device)
//! - Define **Events** (immutable audit records of binding transitions)
//! - Contain the structural validation each aggregate enforces
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod event;
pub mod location;

/// Free-form key/value bag attached to devices and locations.
pub type Properties = serde_json::Map<String, serde_json::Value>;
