//! # Menu Board Security
//!
//! Admin tokens, password checks and client-side session expiry.

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtError, JwtService};
pub use password::PasswordService;
pub use session::SessionToken;
