//! Cache key definitions
//!
//! Keys are deterministic `resource:identifier` strings. Each key kind
//! carries its own TTL.

use std::fmt;

use linkhub_core::value_objects::UserId;

/// TTL for per-user private projections (profile, link list)
pub const PRIVATE_TTL_SECS: u64 = 300;

/// TTL for the public page
pub const PUBLIC_TTL_SECS: u64 = 600;

/// Cached projection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// All links of a user, `links:{userId}`
    Links(UserId),
    /// Profile of a user, `profile:{userId}`
    Profile(UserId),
    /// Public page by username, `public:{username}`
    PublicPage(String),
}

impl CacheKey {
    #[must_use]
    pub fn ttl_secs(&self) -> u64 {
        match self {
            Self::Links(_) | Self::Profile(_) => PRIVATE_TTL_SECS,
            Self::PublicPage(_) => PUBLIC_TTL_SECS,
        }
    }

    /// Every key derived from one user's data
    #[must_use]
    pub fn all_for_user(user_id: UserId, username: &str) -> Vec<Self> {
        vec![
            Self::Links(user_id),
            Self::Profile(user_id),
            Self::PublicPage(username.to_string()),
        ]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Links(id) => write!(f, "links:{id}"),
            Self::Profile(id) => write!(f, "profile:{id}"),
            Self::PublicPage(username) => write!(f, "public:{username}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let id: UserId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(
            CacheKey::Links(id).to_string(),
            "links:67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert_eq!(
            CacheKey::Profile(id).to_string(),
            "profile:67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert_eq!(CacheKey::PublicPage("demo".into()).to_string(), "public:demo");
    }

    #[test]
    fn test_ttls() {
        let id = UserId::new();
        assert_eq!(CacheKey::Links(id).ttl_secs(), 300);
        assert_eq!(CacheKey::Profile(id).ttl_secs(), 300);
        assert_eq!(CacheKey::PublicPage("demo".into()).ttl_secs(), 600);
    }

    #[test]
    fn test_all_for_user() {
        let id = UserId::new();
        let keys = CacheKey::all_for_user(id, "demo");
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&CacheKey::PublicPage("demo".into())));
    }
}
