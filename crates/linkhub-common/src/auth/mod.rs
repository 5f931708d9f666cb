//! Authentication utilities

mod password;
mod session;

pub use password::PasswordService;
pub use session::{JwtService, SessionClaims, SessionToken};
