//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use linkhub_core::{Link, PlatformStats, User, UserCounts, UserWithCounts, View};

use super::responses::{
    AccountResponse, AdminLinkResponse, AdminUserResponse, AdminUserSummary, CountsResponse,
    DailyStatResponse, LinkResponse, ProfileResponse, PublicLinkResponse, PublicPageResponse,
    RecentUserResponse, StatsOverview, StatsResponse, ThemeResponse, TopUserResponse, ViewResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            bio: user.bio.clone(),
            avatar: user.avatar.clone(),
            theme: user.theme,
        }
    }
}

impl From<&User> for AccountResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for ThemeResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            theme: user.theme,
        }
    }
}

impl From<UserCounts> for CountsResponse {
    fn from(counts: UserCounts) -> Self {
        Self {
            links: counts.links,
            views: counts.views,
        }
    }
}

impl AdminUserResponse {
    #[must_use]
    pub fn new(user: &User, counts: UserCounts) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            bio: user.bio.clone(),
            avatar: user.avatar.clone(),
            theme: user.theme,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
            count: counts.into(),
        }
    }
}

impl From<&UserWithCounts> for AdminUserSummary {
    fn from(row: &UserWithCounts) -> Self {
        let user = &row.user;
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
            count: row.counts.into(),
        }
    }
}

// ============================================================================
// Link Mappers
// ============================================================================

impl From<&Link> for LinkResponse {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.to_string(),
            user_id: link.user_id.to_string(),
            title: link.title.clone(),
            url: link.url.clone(),
            order: link.order,
            is_active: link.is_active,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

impl From<&Link> for PublicLinkResponse {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.to_string(),
            title: link.title.clone(),
            url: link.url.clone(),
            order: link.order,
        }
    }
}

impl From<&Link> for AdminLinkResponse {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.to_string(),
            title: link.title.clone(),
            url: link.url.clone(),
            order: link.order,
            is_active: link.is_active,
            created_at: link.created_at,
        }
    }
}

impl PublicPageResponse {
    /// Build the page from a user and its links; inactive links are dropped
    #[must_use]
    pub fn new(user: &User, links: &[Link]) -> Self {
        let mut active: Vec<Link> = links.iter().filter(|l| l.is_active).cloned().collect();
        Link::sort_for_display(&mut active);

        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            username: user.username.clone(),
            bio: user.bio.clone(),
            avatar: user.avatar.clone(),
            theme: user.theme,
            links: active.iter().map(PublicLinkResponse::from).collect(),
        }
    }
}

// ============================================================================
// View Mappers
// ============================================================================

impl From<&View> for ViewResponse {
    fn from(view: &View) -> Self {
        Self {
            id: view.id.to_string(),
            user_agent: view.user_agent.clone(),
            referer: view.referer.clone(),
            ip_address: view.ip_address.clone(),
            created_at: view.created_at,
        }
    }
}

// ============================================================================
// Stats Mappers
// ============================================================================

impl From<&PlatformStats> for StatsResponse {
    fn from(stats: &PlatformStats) -> Self {
        Self {
            overview: StatsOverview {
                total_users: stats.total_users,
                active_users: stats.active_users,
                total_links: stats.total_links,
                total_views: stats.total_views,
                user_growth_rate: stats.user_growth_rate(),
            },
            recent_users: stats
                .recent_users
                .iter()
                .map(|user| RecentUserResponse {
                    id: user.id.to_string(),
                    name: user.name.clone(),
                    username: user.username.clone(),
                    email: user.email.clone(),
                    created_at: user.created_at,
                })
                .collect(),
            top_users: stats
                .top_users
                .iter()
                .map(|row| TopUserResponse {
                    id: row.user.id.to_string(),
                    name: row.user.name.clone(),
                    username: row.user.username.clone(),
                    count: row.counts.into(),
                })
                .collect(),
            daily_stats: stats
                .daily_signups
                .iter()
                .map(|day| DailyStatResponse {
                    date: day.date,
                    count: day.count,
                })
                .collect(),
        }
    }
}
