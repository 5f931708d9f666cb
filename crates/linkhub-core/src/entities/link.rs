//! Link entity - one outbound link on a user's page

use chrono::{DateTime, Utc};

use crate::value_objects::{LinkId, UserId};

/// Outbound link owned by exactly one user
///
/// `order` is a display position. Values need not be unique or contiguous;
/// ties fall back to creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    pub user_id: UserId,
    pub title: String,
    pub url: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Create a new active link
    pub fn new(id: LinkId, user_id: UserId, title: String, url: String, order: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            title,
            url,
            order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Order assigned to a link appended after `current_max`
    #[inline]
    pub fn next_order(current_max: Option<i32>) -> i32 {
        current_max.map_or(0, |max| max.saturating_add(1))
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Sort links into display sequence: ascending order, ties broken by
    /// insertion (created_at, then id)
    pub fn sort_for_display(links: &mut [Link]) {
        links.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_order() {
        assert_eq!(Link::next_order(None), 0);
        assert_eq!(Link::next_order(Some(0)), 1);
        assert_eq!(Link::next_order(Some(41)), 42);
        assert_eq!(Link::next_order(Some(i32::MAX)), i32::MAX);
    }

    #[test]
    fn test_sort_for_display() {
        let owner = UserId::new();
        let mut links = vec![
            Link::new(LinkId::new(), owner, "c".into(), "https://c.dev".into(), 5),
            Link::new(LinkId::new(), owner, "a".into(), "https://a.dev".into(), 0),
            Link::new(LinkId::new(), owner, "b".into(), "https://b.dev".into(), 2),
        ];
        Link::sort_for_display(&mut links);
        let titles: Vec<_> = links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[test]
    fn test_ownership() {
        let owner = UserId::new();
        let link = Link::new(LinkId::new(), owner, "t".into(), "https://t.dev".into(), 0);
        assert!(link.is_owned_by(owner));
        assert!(!link.is_owned_by(UserId::new()));
    }
}
