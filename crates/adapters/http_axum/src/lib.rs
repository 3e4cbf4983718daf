//! # inventory-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API under `/inventory/v1` (devices, locations, the
//!   install/remove binding endpoints, events and history)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map [`InventoryError`](inventory_domain::error::InventoryError) kinds to
//!   status codes and a `{ code, message }` body
//!
//! The application services are synchronous and only touch process memory,
//! so handlers call them inline without `spawn_blocking`.
//!
//! ## Dependency rule
//! Depends on `inventory-app` (for port traits and services) and
//! `inventory-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
