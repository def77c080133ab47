//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use campus_eats_core::{Email, UserId};

/// A registered customer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Login email; unique across accounts.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create an account.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a Email,
    /// Argon2id PHC string.
    pub password_hash: &'a str,
}
