//! Field format rules shared by registration, profile edits and links

use validator::{ValidateEmail, ValidateUrl};

/// Usernames are non-empty and limited to ASCII letters, digits and `_`
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

/// Links must be absolute URLs
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    url.validate_url()
}
