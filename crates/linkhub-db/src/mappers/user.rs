//! User model -> entity mapper

use linkhub_core::entities::{User, UserCounts, UserWithCounts};
use linkhub_core::error::DomainError;
use linkhub_core::value_objects::UserId;

use crate::models::{UserModel, UserWithCountsModel};

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let theme = model
            .theme
            .parse()
            .map_err(|_| DomainError::InternalError(format!("unknown theme {:?}", model.theme)))?;
        let role = model
            .role
            .parse()
            .map_err(|_| DomainError::InternalError(format!("unknown role {:?}", model.role)))?;

        Ok(User {
            id: UserId::from_uuid(model.id),
            email: model.email,
            name: model.name,
            username: model.username,
            bio: model.bio,
            avatar: model.avatar,
            theme,
            role,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<UserWithCountsModel> for UserWithCounts {
    type Error = DomainError;

    fn try_from(model: UserWithCountsModel) -> Result<Self, Self::Error> {
        Ok(UserWithCounts {
            user: User::try_from(model.user)?,
            counts: UserCounts {
                links: model.link_count,
                views: model.view_count,
            },
        })
    }
}
