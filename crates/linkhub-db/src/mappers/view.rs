//! View model -> entity mapper

use linkhub_core::entities::View;
use linkhub_core::value_objects::{UserId, ViewId};

use crate::models::ViewModel;

impl From<ViewModel> for View {
    fn from(model: ViewModel) -> Self {
        View {
            id: ViewId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            user_agent: model.user_agent,
            referer: model.referer,
            ip_address: model.ip_address,
            created_at: model.created_at,
        }
    }
}
