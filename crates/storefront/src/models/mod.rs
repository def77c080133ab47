//! Storefront models: session-stored identity and account records.

pub mod session;
pub mod user;

pub use session::{CurrentUser, keys as session_keys};
pub use user::{NewUser, User};
