//! Link service
//!
//! Owner-scoped CRUD and reordering of links. The link list is served
//! read-through from the cache; every write invalidates the owner's link
//! list and public page.

use linkhub_cache::CacheKey;
use linkhub_core::{DomainError, Link, LinkId, UserId};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{CreateLinkRequest, LinkResponse, ReorderLinksRequest, UpdateLinkRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Link service
pub struct LinkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LinkService<'a> {
    /// Create a new LinkService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All of the owner's links in display order, active or not
    #[instrument(skip(self))]
    pub async fn list_links(&self, user_id: UserId) -> ServiceResult<Vec<LinkResponse>> {
        let key = CacheKey::Links(user_id);
        if let Some(cached) = self.ctx.cache().get::<Vec<LinkResponse>>(&key).await {
            return Ok(cached);
        }

        let links = self.ctx.link_repo().find_by_user(user_id).await?;
        let response: Vec<LinkResponse> = links.iter().map(LinkResponse::from).collect();

        self.ctx.cache().put(&key, &response).await;
        Ok(response)
    }

    /// Append a link after the owner's current last one
    #[instrument(skip(self, request))]
    pub async fn create_link(
        &self,
        user_id: UserId,
        request: CreateLinkRequest,
    ) -> ServiceResult<LinkResponse> {
        request.validate()?;
        let title = request.title.unwrap_or_default();
        let url = request.url.unwrap_or_default();

        let max_order = self.ctx.link_repo().max_order(user_id).await?;
        let mut link = Link::new(LinkId::new(), user_id, title, url, Link::next_order(max_order));
        if let Some(is_active) = request.is_active {
            link.is_active = is_active;
        }

        self.ctx.link_repo().create(&link).await?;
        info!(link_id = %link.id, order = link.order, "Link created");

        self.invalidate(user_id).await;
        Ok(LinkResponse::from(&link))
    }

    /// Update title, url and optionally the active flag of an owned link
    #[instrument(skip(self, request))]
    pub async fn update_link(
        &self,
        user_id: UserId,
        link_id: LinkId,
        request: UpdateLinkRequest,
    ) -> ServiceResult<LinkResponse> {
        request.validate()?;

        let mut link = self
            .ctx
            .link_repo()
            .find_owned(link_id, user_id)
            .await?
            .ok_or(DomainError::LinkNotFound)?;

        link.title = request.title.unwrap_or_default();
        link.url = request.url.unwrap_or_default();
        if let Some(is_active) = request.is_active {
            link.is_active = is_active;
        }
        link.touch();

        self.ctx.link_repo().update(&link).await?;
        info!(link_id = %link.id, "Link updated");

        self.invalidate(user_id).await;
        Ok(LinkResponse::from(&link))
    }

    /// Delete an owned link
    #[instrument(skip(self))]
    pub async fn delete_link(
        &self,
        user_id: UserId,
        link_id: LinkId,
    ) -> ServiceResult<()> {
        self.ctx.link_repo().delete(link_id, user_id).await?;
        info!(link_id = %link_id, "Link deleted");

        self.invalidate(user_id).await;
        Ok(())
    }

    /// Apply a batch of `(id, order)` pairs atomically
    ///
    /// The batch may cover any subset of the owner's links and order values
    /// need not be unique. A malformed or foreign id fails the whole batch
    /// with "Link not found".
    #[instrument(skip(self, request))]
    pub async fn reorder_links(
        &self,
        user_id: UserId,
        request: ReorderLinksRequest,
    ) -> ServiceResult<()> {
        request.validate()?;
        let entries = request.links.unwrap_or_default();

        let orders = entries
            .iter()
            .map(|entry| {
                entry
                    .id
                    .parse::<LinkId>()
                    .map(|id| (id, entry.order))
                    .map_err(|_| DomainError::LinkNotFound)
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.ctx.link_repo().reorder(user_id, &orders).await?;
        info!(count = orders.len(), "Links reordered");

        self.invalidate(user_id).await;
        Ok(())
    }

    /// Drop the owner's link list and public page. The username is read
    /// back from storage since a session may predate a rename.
    async fn invalidate(&self, user_id: UserId) {
        let mut keys = vec![CacheKey::Links(user_id)];
        match self.ctx.user_repo().find_by_id(user_id).await {
            Ok(Some(user)) => keys.push(CacheKey::PublicPage(user.username)),
            Ok(None) => {}
            Err(e) => warn!(user_id = %user_id, error = %e, "Owner lookup for invalidation failed"),
        }
        self.ctx.cache().invalidate(&keys).await;
    }
}
