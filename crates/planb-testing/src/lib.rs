//! Testing infrastructure for planb integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: isolated CLI environment with its own config and payloads
//! - `sources`: in-memory plan sources, including one whose loads finish on demand
//! - `assertions`: readable checks over widget views and emitted events
//! - `fixtures`: sample payloads and helpers to place them on disk

pub mod assertions;
pub mod fixtures;
pub mod sources;
pub mod world;

pub use sources::{GatedSource, StaticSource};
pub use world::TestWorld;
