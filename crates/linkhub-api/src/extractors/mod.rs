//! Axum extractors for request handling
//!
//! Custom extractors for authentication, JSON bodies, path ids and client
//! details.

mod auth;
mod client;
mod json;
mod path;

pub use auth::{AdminUser, AuthUser};
pub use client::{client_ip, ClientInfo};
pub use json::{JsonBody, QueryParams};
pub use path::{LinkIdPath, UserIdPath, UsernamePath};
