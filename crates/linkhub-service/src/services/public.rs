//! Public service
//!
//! Unauthenticated reads of a user's public page and page-view recording.

use linkhub_cache::CacheKey;
use linkhub_core::{DomainError, View};
use tracing::{info, instrument};

use crate::dto::{PublicPageResponse, RecordViewRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Client details captured alongside a view
#[derive(Debug, Clone, Default)]
pub struct ViewerInfo {
    /// `User-Agent` request header
    pub user_agent: Option<String>,
    /// Client address as resolved by the API layer
    pub ip_address: String,
}

/// Public service
pub struct PublicService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PublicService<'a> {
    /// Create a new PublicService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public page of `username` with its active links, read through the cache
    #[instrument(skip(self))]
    pub async fn public_page(&self, username: &str) -> ServiceResult<PublicPageResponse> {
        let key = CacheKey::PublicPage(username.to_string());
        if let Some(cached) = self.ctx.cache().get::<PublicPageResponse>(&key).await {
            return Ok(cached);
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        let links = self.ctx.link_repo().find_active_by_user(user.id).await?;
        let response = PublicPageResponse::new(&user, &links);

        self.ctx.cache().put(&key, &response).await;
        Ok(response)
    }

    /// Record one visit to `username`'s page
    ///
    /// The body's `userAgent` wins over the request header.
    #[instrument(skip(self, request, viewer))]
    pub async fn record_view(
        &self,
        username: &str,
        request: RecordViewRequest,
        viewer: ViewerInfo,
    ) -> ServiceResult<()> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let view = View::new(
            user.id,
            request.user_agent.or(viewer.user_agent),
            request.referer,
            viewer.ip_address,
        );
        self.ctx.view_repo().create(&view).await?;
        info!(user_id = %user.id, view_id = %view.id, "View recorded");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CreateLinkRequest, UpdateLinkRequest};
    use crate::services::LinkService;
    use crate::testing::TestContext;

    async fn add_link(test: &TestContext, user: &linkhub_core::User, title: &str) -> String {
        LinkService::new(&test.ctx)
            .create_link(
                user.id,
                CreateLinkRequest {
                    title: Some(title.to_string()),
                    url: Some(format!("https://{}.io", title.to_lowercase())),
                    is_active: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_public_page_shows_only_active_links() {
        let test = TestContext::new();
        let user = test.seed_user("demo").await;
        add_link(&test, &user, "Shown").await;
        let hidden = add_link(&test, &user, "Hidden").await;
        LinkService::new(&test.ctx)
            .update_link(
                user.id,
                hidden.parse().unwrap(),
                UpdateLinkRequest {
                    title: Some("Hidden".into()),
                    url: Some("https://hidden.io".into()),
                    is_active: Some(false),
                },
            )
            .await
            .unwrap();

        let page = PublicService::new(&test.ctx).public_page("demo").await.unwrap();
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].title, "Shown");
    }

    #[tokio::test]
    async fn test_public_page_cached_and_refreshed_after_write() {
        let test = TestContext::new();
        let user = test.seed_user("demo").await;
        let service = PublicService::new(&test.ctx);

        assert!(service.public_page("demo").await.unwrap().links.is_empty());
        assert!(test.cache_backend.contains("public:demo"));

        add_link(&test, &user, "Fresh").await;
        assert!(!test.cache_backend.contains("public:demo"));
        assert_eq!(service.public_page("demo").await.unwrap().links.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_username_is_not_found() {
        let test = TestContext::new();
        let service = PublicService::new(&test.ctx);

        let err = service.public_page("ghost").await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = service
            .record_view("ghost", RecordViewRequest::default(), ViewerInfo::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User not found");
        assert!(test.views.all().is_empty());
    }

    #[tokio::test]
    async fn test_record_view_prefers_body_user_agent() {
        let test = TestContext::new();
        let user = test.seed_user("demo").await;
        let service = PublicService::new(&test.ctx);
        let viewer = ViewerInfo {
            user_agent: Some("header-agent".into()),
            ip_address: "203.0.113.7".into(),
        };

        service
            .record_view(
                "demo",
                RecordViewRequest {
                    user_agent: Some("body-agent".into()),
                    referer: Some("https://ref.io".into()),
                },
                viewer.clone(),
            )
            .await
            .unwrap();
        service
            .record_view("demo", RecordViewRequest::default(), viewer)
            .await
            .unwrap();

        let mut agents: Vec<_> = test
            .views
            .all()
            .into_iter()
            .inspect(|v| {
                assert_eq!(v.user_id, user.id);
                assert_eq!(v.ip_address, "203.0.113.7");
            })
            .filter_map(|v| v.user_agent)
            .collect();
        agents.sort();
        assert_eq!(agents, vec!["body-agent", "header-agent"]);
    }
}
