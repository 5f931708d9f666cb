//! Domain entities - core business objects

mod link;
mod stats;
mod user;
mod view;

pub use link::Link;
pub use stats::{
    DailyCount, PlatformStats, UserCounts, UserPage, UserQuery, UserStatusFilter, UserWithCounts,
};
pub use user::User;
pub use view::View;
