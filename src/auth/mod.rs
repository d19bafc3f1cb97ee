//! Authentication
//!
//! Handles:
//! - Signed bearer session tokens
//! - Password hashing
//! - Current-user extraction

mod middleware;
pub mod password;
pub mod session;

pub use middleware::CurrentUser;
pub use session::{Session, create_session_token, verify_session_token};
