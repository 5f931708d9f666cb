//! Value objects - immutable types that represent domain concepts

mod ids;
mod role;
mod theme;
mod validation;

pub use ids::{IdParseError, LinkId, UserId, ViewId};
pub use role::{Role, RoleParseError};
pub use theme::{Theme, ThemeParseError};
pub use validation::{is_valid_email, is_valid_url, is_valid_username};
