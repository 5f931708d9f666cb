//! Integration test utilities for the link-in-bio server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API backed by a real PostgreSQL database.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
