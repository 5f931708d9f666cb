//! Read models used by the admin area

use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

use super::User;
use crate::value_objects::Role;

/// Number of links and views owned by a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounts {
    pub links: i64,
    pub views: i64,
}

/// User together with its owned-record counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithCounts {
    pub user: User,
    pub counts: UserCounts,
}

/// Account status filter for user listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatusFilter {
    Active,
    Inactive,
}

impl UserStatusFilter {
    #[inline]
    pub fn matches(self, is_active: bool) -> bool {
        match self {
            Self::Active => is_active,
            Self::Inactive => !is_active,
        }
    }
}

impl FromStr for UserStatusFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(()),
        }
    }
}

/// Paged, filtered user listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    /// Case-insensitive substring of name, email or username
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatusFilter>,
}

impl UserQuery {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Rows to skip for the requested page
    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }

    /// Lowercased search term, `None` when blank
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether `user` passes the role/status/search filters
    pub fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|role| role != user.role) {
            return false;
        }
        if self.status.is_some_and(|status| !status.matches(user.is_active)) {
            return false;
        }
        match self.search_term() {
            Some(term) => [&user.name, &user.email, &user.username]
                .iter()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
            search: None,
            role: None,
            status: None,
        }
    }
}

/// One page of a user listing plus the unpaged total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<UserWithCounts>,
    pub total: i64,
}

/// Signups on one calendar day (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Platform-wide statistics
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformStats {
    pub total_users: i64,
    /// Active accounts updated within the last 30 days
    pub active_users: i64,
    pub total_links: i64,
    pub total_views: i64,
    /// Signups in the last 30 days
    pub users_last_30d: i64,
    /// Signups in the 30 days before that
    pub users_prev_30d: i64,
    /// Newest 5 signups of the last 7 days
    pub recent_users: Vec<User>,
    /// 5 users with the most links
    pub top_users: Vec<UserWithCounts>,
    pub daily_signups: Vec<DailyCount>,
    pub generated_at: DateTime<Utc>,
}

impl PlatformStats {
    pub const ACTIVE_WINDOW_DAYS: i64 = 30;
    pub const RECENT_WINDOW_DAYS: i64 = 7;
    pub const LEADERBOARD_SIZE: i64 = 5;

    /// Signup growth in percent, rounded to two decimals; 0 when there is
    /// no previous period to compare against
    pub fn user_growth_rate(&self) -> f64 {
        if self.users_prev_30d == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = (self.users_last_30d - self.users_prev_30d) as f64
            / self.users_prev_30d as f64
            * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::UserId;

    fn user(name: &str, email: &str, username: &str) -> User {
        User::new(
            UserId::new(),
            email.to_string(),
            name.to_string(),
            username.to_string(),
        )
    }

    fn stats(last: i64, prev: i64) -> PlatformStats {
        PlatformStats {
            total_users: 0,
            active_users: 0,
            total_links: 0,
            total_views: 0,
            users_last_30d: last,
            users_prev_30d: prev,
            recent_users: vec![],
            top_users: vec![],
            daily_signups: vec![],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_offset() {
        let mut query = UserQuery::default();
        assert_eq!(query.offset(), 0);
        query.page = 3;
        query.limit = 25;
        assert_eq!(query.offset(), 50);
        query.page = 0;
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_query_matches_search_case_insensitive() {
        let u = user("Jane Doe", "jane@example.com", "jdoe");
        let query = UserQuery {
            search: Some("JANE".to_string()),
            ..UserQuery::default()
        };
        assert!(query.matches(&u));

        let query = UserQuery {
            search: Some("nobody".to_string()),
            ..UserQuery::default()
        };
        assert!(!query.matches(&u));
    }

    #[test]
    fn test_query_matches_role_and_status() {
        let mut u = user("A", "a@example.com", "a");
        let admins = UserQuery {
            role: Some(Role::Admin),
            ..UserQuery::default()
        };
        assert!(!admins.matches(&u));
        u.role = Role::Admin;
        assert!(admins.matches(&u));

        let inactive = UserQuery {
            status: Some(UserStatusFilter::Inactive),
            ..UserQuery::default()
        };
        assert!(!inactive.matches(&u));
        u.is_active = false;
        assert!(inactive.matches(&u));
    }

    #[test]
    fn test_growth_rate() {
        assert!((stats(15, 10).user_growth_rate() - 50.0).abs() < f64::EPSILON);
        assert!((stats(5, 10).user_growth_rate() + 50.0).abs() < f64::EPSILON);
        assert!((stats(1, 3).user_growth_rate() + 66.67).abs() < 1e-9);
        assert!(stats(7, 0).user_growth_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("active".parse(), Ok(UserStatusFilter::Active));
        assert_eq!("inactive".parse(), Ok(UserStatusFilter::Inactive));
        assert!("all".parse::<UserStatusFilter>().is_err());
    }
}
