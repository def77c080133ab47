//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Account signup and password login

pub mod auth;
