//! Path parameter extractors
//!
//! Ids arrive as strings. One that does not parse cannot name an existing
//! record, so it is reported as that record's not-found error.

use linkhub_core::{DomainError, LinkId, UserId};
use serde::Deserialize;

use crate::response::ApiError;

/// Path parameters with a link id
#[derive(Debug, Deserialize)]
pub struct LinkIdPath {
    pub id: String,
}

impl LinkIdPath {
    /// Parse id as LinkId
    pub fn link_id(&self) -> Result<LinkId, ApiError> {
        self.id.parse().map_err(|_| DomainError::LinkNotFound.into())
    }
}

/// Path parameters with a user id
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub id: String,
}

impl UserIdPath {
    /// Parse id as UserId
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        self.id.parse().map_err(|_| DomainError::UserNotFound.into())
    }
}

/// Path parameters with a username
#[derive(Debug, Deserialize)]
pub struct UsernamePath {
    pub username: String,
}
