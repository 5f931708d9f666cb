//! Domain errors - error types for the domain layer
//!
//! Display strings double as client-facing messages, so they never carry
//! ids or driver details. Infrastructure variants are the exception and are
//! masked by the API layer.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found")]
    UserNotFound,

    #[error("Link not found")]
    LinkNotFound,

    #[error("Record not found")]
    RecordNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Username can only contain letters, numbers, and underscores")]
    InvalidUsername,

    #[error("Invalid URL format")]
    InvalidUrl,

    #[error("Invalid theme")]
    InvalidTheme,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Admin access required")]
    AdminRequired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Unique constraint failed")]
    UniqueViolation,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot delete your own account")]
    CannotDeleteSelf,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound => "UNKNOWN_USER",
            Self::LinkNotFound => "UNKNOWN_LINK",
            Self::RecordNotFound => "NOT_FOUND",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidUrl => "INVALID_URL",
            Self::InvalidTheme => "INVALID_THEME",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::UniqueViolation => "UNIQUE_VIOLATION",

            // Business Rules
            Self::CannotDeleteSelf => "CANNOT_DELETE_SELF",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::DatabaseUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound | Self::LinkNotFound | Self::RecordNotFound
        )
    }

    /// Check if this is a validation error (including business rule violations)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidUsername
                | Self::InvalidUrl
                | Self::InvalidTheme
                | Self::CannotDeleteSelf
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AdminRequired)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::UsernameTaken
                | Self::UniqueViolation
        )
    }

    /// Check if the backing store could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::DatabaseUnavailable(_))
    }
}
