//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in linkhub-core.

mod error;
mod link;
mod stats;
mod user;
mod view;

pub use error::map_db_error;
pub use link::PgLinkRepository;
pub use stats::PgStatsRepository;
pub use user::PgUserRepository;
pub use view::PgViewRepository;
