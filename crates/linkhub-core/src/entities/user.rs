//! User entity - an account that owns a public page

use chrono::{DateTime, Utc};

use crate::value_objects::{Role, Theme, UserId};

/// User account
///
/// The password hash is deliberately not part of the entity; repositories
/// expose it through a dedicated lookup used only during sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: Theme,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with the default theme and role
    pub fn new(id: UserId, email: String, name: String, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            name,
            username,
            bio: None,
            avatar: None,
            theme: Theme::default(),
            role: Role::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Admin privileges require both the role and an active account
    #[inline]
    pub fn can_administer(&self) -> bool {
        self.is_admin() && self.is_active
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.touch();
    }

    /// Bump `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::new(
            UserId::new(),
            "demo@example.com".to_string(),
            "Demo".to_string(),
            "demo".to_string(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample();
        assert_eq!(user.theme, Theme::Light);
        assert_eq!(user.role, Role::User);
        assert!(user.is_active);
        assert!(user.bio.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_can_administer_requires_active() {
        let mut user = sample();
        assert!(!user.can_administer());

        user.role = Role::Admin;
        assert!(user.can_administer());

        user.is_active = false;
        assert!(!user.can_administer());
    }

    #[test]
    fn test_set_theme_touches() {
        let mut user = sample();
        let before = user.updated_at;
        user.set_theme(Theme::Dark);
        assert_eq!(user.theme, Theme::Dark);
        assert!(user.updated_at >= before);
    }
}
