//! Campus Eats Core - Shared domain library.
//!
//! This crate holds the types and pure logic used by the storefront server
//! and the CLI:
//!
//! - [`types`] - Newtype wrappers for IDs, emails and prices
//! - [`catalog`] - University, canteen and menu records
//! - [`cart`] - The per-session cart aggregator
//! - [`checkout`] - Wire tokens and server-side checkout aggregation
//! - [`order`] - Payment method selection for order placement
//!
//! # Architecture
//!
//! Nothing in here performs I/O. Storage, HTTP and sessions live in the
//! storefront crate so this one can be used from tests and tools freely.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod types;

pub use cart::{Cart, CartLine, CartSubmission, CartSummary};
pub use catalog::{Canteen, Catalog, CatalogError, MenuItem};
pub use checkout::{
    Checkout, CheckoutError, CheckoutLine, DEFAULT_CHECKOUT_LABEL, LineToken, TokenError,
};
pub use order::{OrderError, PaymentMethod, PaymentSelection};
pub use types::*;
