//! Integration test utilities for the marketplace API
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API, plus database seeding for accounts the public surface
//! cannot create (admins, pre-verified users).

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
