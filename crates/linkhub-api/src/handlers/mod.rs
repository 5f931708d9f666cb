//! Route handlers
//!
//! All HTTP request handlers organized by area.

pub mod admin;
pub mod auth;
pub mod health;
pub mod links;
pub mod profile;
pub mod public;
