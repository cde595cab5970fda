//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`vision`]: Scripted [`VisionModel`](crate::port::outbound::vision::VisionModel)
//!   with per-side outcomes, gates and call counters.
//! - [`store`]: In-memory [`KeyValueStore`](crate::port::outbound::storage::KeyValueStore)
//!   with injectable failures.
//! - [`domain`]: Builders for animals, vision details and settings.

pub mod domain;
pub mod store;
pub mod vision;
