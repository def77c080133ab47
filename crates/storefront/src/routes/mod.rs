//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - University list
//! GET  /canteens?university=   - Canteens at a university
//! GET  /menu/{canteen_id}      - Canteen menu with cart controls
//!
//! # Cart (session)
//! POST /cart/add               - Add one unit, redirect back to the menu
//! POST /cart/remove            - Remove one unit, redirect back to the menu
//!
//! # Checkout
//! POST /checkout               - Aggregate `name|price` tokens into a summary
//! POST /api/checkout           - Structured checkout priced from the catalog
//! POST /place-order            - Validate payment method, 303 to success page
//! GET  /order-success          - Order acknowledgment
//!
//! # Auth
//! GET  /signup                 - Signup page
//! POST /signup                 - Create account
//! GET  /login                  - Login page
//! POST /login                  - Start session
//! GET  /logout                 - Destroy session
//!
//! # Static pages
//! GET  /help
//! GET  /deliverers
//! GET  /add-canteen
//! ```

pub mod auth;
pub mod canteens;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod home;
pub mod orders;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Create the cart and checkout routes router.
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/cart/add", post(cart::add))
        .route("/cart/remove", post(cart::remove))
        .route("/checkout", post(checkout::checkout))
        .route("/api/checkout", post(checkout::api_checkout))
        .route("/place-order", post(orders::place_order))
        .route("/order-success", get(orders::order_success))
}

/// Create the main routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/canteens", get(canteens::canteens))
        .route("/menu/{canteen_id}", get(canteens::menu))
        .route("/help", get(pages::help))
        .route("/deliverers", get(pages::deliverers))
        .route("/add-canteen", get(pages::add_canteen))
        .merge(order_routes())
        .merge(auth_routes())
}
