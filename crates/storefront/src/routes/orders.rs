//! Order placement route handlers.
//!
//! Orders are not stored: a valid payment method ends the flow with an
//! acknowledgment page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use campus_eats_core::{Cart, PaymentSelection};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, session_keys};

/// Order form posted from the checkout page.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderForm {
    #[serde(rename = "paymentMethod")]
    pub payment_method: Option<String>,
}

/// Order acknowledgment template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/order_success.html")]
pub struct OrderSuccessTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Record the payment method and finish the order.
///
/// A missing or blank method is a 400. Any other value is accepted and
/// logged as submitted. On success the session cart is dropped and the
/// client is sent to `/order-success`.
#[instrument(skip(session, current_user, form))]
pub async fn place_order(
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
    Form(form): Form<PlaceOrderForm>,
) -> Result<impl IntoResponse> {
    let payment = PaymentSelection::parse(form.payment_method.as_deref())?;

    let cart = session.remove::<Cart>(session_keys::CART).await?;
    let user_id = current_user.as_ref().map(|user| user.id.to_string());

    tracing::info!(
        payment_method = %payment,
        offered_method = payment.method().is_some(),
        user_id = user_id.as_deref().unwrap_or("guest"),
        canteen = cart.as_ref().map(Cart::canteen_name),
        "Order placed"
    );
    add_breadcrumb("order", "Order placed", Some(&[("payment_method", payment.as_str())]));

    Ok(Redirect::to("/order-success"))
}

pub async fn order_success(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    OrderSuccessTemplate { current_user }
}
