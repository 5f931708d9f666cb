//! Database models - SQLx-compatible structs for PostgreSQL tables

mod link;
mod stats;
mod user;
mod view;

pub use link::LinkModel;
pub use stats::{DailyCountModel, TotalsModel};
pub use user::{UserModel, UserWithCountsModel};
pub use view::ViewModel;
