//! Link model -> entity mapper

use linkhub_core::entities::Link;
use linkhub_core::value_objects::{LinkId, UserId};

use crate::models::LinkModel;

impl From<LinkModel> for Link {
    fn from(model: LinkModel) -> Self {
        Link {
            id: LinkId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            title: model.title,
            url: model.url,
            order: model.order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
