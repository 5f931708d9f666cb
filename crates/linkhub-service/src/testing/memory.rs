//! In-memory repositories
//!
//! All four repositories share one `InMemoryStore`, so user deletion
//! cascades to links and views the way the database does. Each repository
//! counts its calls so tests can assert that persistence was never reached.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use linkhub_core::traits::{
    LinkRepository, RepoResult, StatsRepository, UserRepository, ViewRepository,
};
use linkhub_core::{
    DailyCount, DomainError, Link, LinkId, PlatformStats, User, UserCounts, UserId, UserPage,
    UserQuery, UserWithCounts, View, ViewId,
};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

/// Shared backing maps
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: DashMap<UserId, StoredUser>,
    links: DashMap<LinkId, Link>,
    views: DashMap<ViewId, View>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every repository call fail as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DomainError::DatabaseUnavailable(
                "in-memory store offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn counts(&self, user_id: UserId) -> UserCounts {
        UserCounts {
            links: count_where(&self.links, |l: &Link| l.user_id == user_id),
            views: count_where(&self.views, |v: &View| v.user_id == user_id),
        }
    }

    fn with_counts(&self, user: User) -> UserWithCounts {
        let counts = self.counts(user.id);
        UserWithCounts { user, counts }
    }

    fn all_users(&self) -> Vec<User> {
        self.users.iter().map(|e| e.user.clone()).collect()
    }
}

fn count_where<K, V>(map: &DashMap<K, V>, pred: impl Fn(&V) -> bool) -> i64
where
    K: Eq + std::hash::Hash,
{
    let n = map.iter().filter(|e| pred(e.value())).count();
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn count_users(users: &[User], pred: impl Fn(&User) -> bool) -> i64 {
    i64::try_from(users.iter().filter(|u| pred(u)).count()).unwrap_or(i64::MAX)
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
    calls: AtomicUsize,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Stored row, bypassing the call counter
    pub fn get(&self, id: UserId) -> Option<User> {
        self.store.users.get(&id).map(|e| e.user.clone())
    }

    pub fn count(&self) -> usize {
        self.store.users.len()
    }

    fn enter(&self) -> RepoResult<()> {
        bump(&self.calls);
        self.store.check_available()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.enter()?;
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.enter()?;
        Ok(self
            .store
            .users
            .iter()
            .find(|e| e.user.email == email)
            .map(|e| e.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.enter()?;
        Ok(self
            .store
            .users
            .iter()
            .find(|e| e.user.username == username)
            .map(|e| e.user.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        self.enter()?;
        Ok(self.store.users.iter().any(|e| e.user.email == email))
    }

    async fn username_taken(&self, username: &str, exclude: Option<UserId>) -> RepoResult<bool> {
        self.enter()?;
        Ok(self
            .store
            .users
            .iter()
            .any(|e| e.user.username == username && Some(e.user.id) != exclude))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.enter()?;
        if self.store.users.iter().any(|e| e.user.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if self.store.users.iter().any(|e| e.user.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        self.store.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        self.enter()?;
        if self
            .store
            .users
            .iter()
            .any(|e| e.user.username == user.username && e.user.id != user.id)
        {
            return Err(DomainError::UsernameTaken);
        }
        let mut entry = self
            .store
            .users
            .get_mut(&user.id)
            .ok_or(DomainError::UserNotFound)?;
        entry.user = user.clone();
        Ok(())
    }

    async fn delete(&self, id: UserId) -> RepoResult<()> {
        self.enter()?;
        self.store
            .users
            .remove(&id)
            .ok_or(DomainError::UserNotFound)?;
        self.store.links.retain(|_, l| l.user_id != id);
        self.store.views.retain(|_, v| v.user_id != id);
        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        self.enter()?;
        Ok(self.store.users.get(&id).map(|e| e.password_hash.clone()))
    }

    async fn list(&self, query: &UserQuery) -> RepoResult<UserPage> {
        self.enter()?;
        let mut users: Vec<User> = self
            .store
            .all_users()
            .into_iter()
            .filter(|u| query.matches(u))
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = i64::try_from(users.len()).unwrap_or(i64::MAX);
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        let users = users
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|u| self.store.with_counts(u))
            .collect();

        Ok(UserPage { users, total })
    }

    async fn counts(&self, id: UserId) -> RepoResult<UserCounts> {
        self.enter()?;
        Ok(self.store.counts(id))
    }

    async fn ping(&self) -> RepoResult<()> {
        self.enter()
    }
}

// ============================================================================
// Links
// ============================================================================

#[derive(Debug)]
pub struct InMemoryLinkRepository {
    store: Arc<InMemoryStore>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryLinkRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.read_calls() + self.writes.load(Ordering::SeqCst)
    }

    /// Stored row, bypassing the call counter
    pub fn get(&self, id: LinkId) -> Option<Link> {
        self.store.links.get(&id).map(|e| e.value().clone())
    }

    pub fn count(&self) -> usize {
        self.store.links.len()
    }

    /// Overwrite a stored order directly
    pub fn set_order(&self, id: LinkId, order: i32) {
        if let Some(mut link) = self.store.links.get_mut(&id) {
            link.order = order;
        }
    }

    fn read(&self) -> RepoResult<()> {
        bump(&self.reads);
        self.store.check_available()
    }

    fn write(&self) -> RepoResult<()> {
        bump(&self.writes);
        self.store.check_available()
    }

    fn collect(&self, pred: impl Fn(&Link) -> bool) -> Vec<Link> {
        let mut links: Vec<Link> = self
            .store
            .links
            .iter()
            .filter(|e| pred(e.value()))
            .map(|e| e.value().clone())
            .collect();
        Link::sort_for_display(&mut links);
        links
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Link>> {
        self.read()?;
        Ok(self.collect(|l| l.user_id == user_id))
    }

    async fn find_active_by_user(&self, user_id: UserId) -> RepoResult<Vec<Link>> {
        self.read()?;
        Ok(self.collect(|l| l.user_id == user_id && l.is_active))
    }

    async fn find_owned(&self, id: LinkId, user_id: UserId) -> RepoResult<Option<Link>> {
        self.read()?;
        Ok(self.get(id).filter(|l| l.is_owned_by(user_id)))
    }

    async fn max_order(&self, user_id: UserId) -> RepoResult<Option<i32>> {
        self.read()?;
        Ok(self
            .store
            .links
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.order)
            .max())
    }

    async fn create(&self, link: &Link) -> RepoResult<()> {
        self.write()?;
        if !self.store.users.contains_key(&link.user_id) {
            return Err(DomainError::UserNotFound);
        }
        self.store.links.insert(link.id, link.clone());
        Ok(())
    }

    async fn update(&self, link: &Link) -> RepoResult<()> {
        self.write()?;
        let mut stored = self
            .store
            .links
            .get_mut(&link.id)
            .filter(|l| l.is_owned_by(link.user_id))
            .ok_or(DomainError::LinkNotFound)?;
        stored.title.clone_from(&link.title);
        stored.url.clone_from(&link.url);
        stored.order = link.order;
        stored.is_active = link.is_active;
        stored.updated_at = link.updated_at;
        Ok(())
    }

    async fn delete(&self, id: LinkId, user_id: UserId) -> RepoResult<()> {
        self.write()?;
        self.store
            .links
            .remove_if(&id, |_, l| l.is_owned_by(user_id))
            .map(|_| ())
            .ok_or(DomainError::LinkNotFound)
    }

    async fn reorder(&self, user_id: UserId, orders: &[(LinkId, i32)]) -> RepoResult<()> {
        self.write()?;
        let all_owned = orders
            .iter()
            .all(|(id, _)| self.get(*id).is_some_and(|l| l.is_owned_by(user_id)));
        if !all_owned {
            return Err(DomainError::LinkNotFound);
        }
        let now = Utc::now();
        for (id, order) in orders {
            if let Some(mut link) = self.store.links.get_mut(id) {
                link.order = *order;
                link.updated_at = now;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug)]
pub struct InMemoryViewRepository {
    store: Arc<InMemoryStore>,
    calls: AtomicUsize,
}

impl InMemoryViewRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every stored view, bypassing the call counter
    pub fn all(&self) -> Vec<View> {
        self.store.views.iter().map(|e| e.value().clone()).collect()
    }

    /// Insert a view with an explicit timestamp
    pub fn insert_at(&self, mut view: View, created_at: DateTime<Utc>) {
        view.created_at = created_at;
        self.store.views.insert(view.id, view);
    }
}

#[async_trait]
impl ViewRepository for InMemoryViewRepository {
    async fn create(&self, view: &View) -> RepoResult<()> {
        bump(&self.calls);
        self.store.check_available()?;
        self.store.views.insert(view.id, view.clone());
        Ok(())
    }

    async fn recent_by_user(&self, user_id: UserId, limit: i64) -> RepoResult<Vec<View>> {
        bump(&self.calls);
        self.store.check_available()?;
        let mut views: Vec<View> = self
            .all()
            .into_iter()
            .filter(|v| v.user_id == user_id)
            .collect();
        views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        views.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(views)
    }
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Debug)]
pub struct InMemoryStatsRepository {
    store: Arc<InMemoryStore>,
    calls: AtomicUsize,
}

impl InMemoryStatsRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn platform_stats(&self, now: DateTime<Utc>) -> RepoResult<PlatformStats> {
        bump(&self.calls);
        self.store.check_available()?;

        let window = Duration::days(PlatformStats::ACTIVE_WINDOW_DAYS);
        let last_start = now - window;
        let prev_start = now - window * 2;
        let leaderboard = usize::try_from(PlatformStats::LEADERBOARD_SIZE).unwrap_or(5);

        let users = self.store.all_users();

        let mut recent_users: Vec<User> = users
            .iter()
            .filter(|u| u.created_at >= now - Duration::days(PlatformStats::RECENT_WINDOW_DAYS))
            .cloned()
            .collect();
        recent_users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_users.truncate(leaderboard);

        let mut top_users: Vec<UserWithCounts> = users
            .iter()
            .cloned()
            .map(|u| self.store.with_counts(u))
            .collect();
        top_users.sort_by(|a, b| {
            b.counts
                .links
                .cmp(&a.counts.links)
                .then(a.user.created_at.cmp(&b.user.created_at))
        });
        top_users.truncate(leaderboard);

        let mut daily: std::collections::BTreeMap<chrono::NaiveDate, i64> =
            std::collections::BTreeMap::new();
        for user in users.iter().filter(|u| u.created_at >= last_start) {
            *daily.entry(user.created_at.date_naive()).or_default() += 1;
        }

        Ok(PlatformStats {
            total_users: count_users(&users, |_| true),
            active_users: count_users(&users, |u| u.is_active && u.updated_at >= last_start),
            total_links: i64::try_from(self.store.links.len()).unwrap_or(i64::MAX),
            total_views: i64::try_from(self.store.views.len()).unwrap_or(i64::MAX),
            users_last_30d: count_users(&users, |u| u.created_at >= last_start),
            users_prev_30d: count_users(&users, |u| {
                u.created_at >= prev_start && u.created_at < last_start
            }),
            recent_users,
            top_users,
            daily_signups: daily
                .into_iter()
                .map(|(date, count)| DailyCount { date, count })
                .collect(),
            generated_at: now,
        })
    }
}
