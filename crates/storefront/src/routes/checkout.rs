//! Checkout route handlers.
//!
//! `POST /checkout` takes the flattened cart posted by the menu page (one
//! `items=name|price` field per unit) and renders the aggregated order.
//! `POST /api/checkout` is the structured variant: names and quantities in,
//! prices from the catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use campus_eats_core::{CanteenId, Checkout, PaymentMethod, Price};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Form field carrying the originating canteen's display name.
const CANTEEN_NAME_FIELD: &str = "canteenName";
/// Repeated form field carrying one `name|price` token per unit.
const ITEMS_FIELD: &str = "items";

// =============================================================================
// Form Checkout
// =============================================================================

/// Checkout line display data for templates.
#[derive(Clone)]
pub struct CheckoutLineView {
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Payment option display data for templates.
#[derive(Clone)]
pub struct PaymentOptionView {
    pub value: &'static str,
    pub label: &'static str,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/checkout.html")]
pub struct CheckoutTemplate {
    pub current_user: Option<CurrentUser>,
    pub canteen_name: String,
    pub lines: Vec<CheckoutLineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub payment_options: Vec<PaymentOptionView>,
}

/// Aggregate the submitted tokens and render the order summary.
///
/// The form is read as raw pairs because `items` repeats once per unit.
#[instrument(skip(current_user, fields))]
pub async fn checkout(
    OptionalAuth(current_user): OptionalAuth,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    let label = fields
        .iter()
        .find(|(key, _)| key == CANTEEN_NAME_FIELD)
        .map(|(_, value)| value.as_str());
    let tokens = fields
        .iter()
        .filter(|(key, _)| key == ITEMS_FIELD)
        .map(|(_, value)| value.as_str());

    let checkout = Checkout::aggregate(label, tokens)?;

    tracing::debug!(
        lines = checkout.lines().len(),
        item_count = checkout.item_count(),
        "Checkout aggregated"
    );

    let lines = checkout
        .lines()
        .iter()
        .map(|line| CheckoutLineView {
            name: line.name().to_owned(),
            price: line.price().to_string(),
            quantity: line.quantity(),
            line_total: line.line_total().to_string(),
        })
        .collect();

    Ok(CheckoutTemplate {
        current_user,
        canteen_name: checkout.label().to_owned(),
        lines,
        item_count: checkout.item_count(),
        subtotal: checkout.subtotal().to_string(),
        payment_options: PaymentMethod::ALL
            .iter()
            .map(|method| PaymentOptionView {
                value: method.as_str(),
                label: method.label(),
            })
            .collect(),
    })
}

// =============================================================================
// Structured Checkout API
// =============================================================================

/// Requested quantity of one menu item.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequestLine {
    pub name: String,
    pub quantity: u32,
}

/// Body of `POST /api/checkout`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub canteen_id: CanteenId,
    pub lines: Vec<CheckoutRequestLine>,
}

/// Priced checkout line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponseLine {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub line_total: Price,
}

/// Response of `POST /api/checkout`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub canteen_name: String,
    pub lines: Vec<CheckoutResponseLine>,
    pub item_count: u32,
    pub subtotal: Price,
}

/// Price a structured cart from the catalog.
///
/// Lines naming the same item are merged in order of first appearance.
/// Quantities whose sum does not fit in a `u32` are a 400.
#[instrument(skip(state, request), fields(canteen_id = %request.canteen_id))]
pub async fn api_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let canteen = state
        .catalog()
        .canteen(request.canteen_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("canteen {}", request.canteen_id)))?;

    let mut checkout = Checkout::new(Some(&canteen.name));
    for line in &request.lines {
        if line.quantity == 0 {
            return Err(AppError::BadRequest(format!(
                "Quantity for {} must be at least 1",
                line.name.trim()
            )));
        }
        let item = canteen.item(&line.name).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown menu item: {}", line.name.trim()))
        })?;
        checkout.add_units(&item.name, item.price, line.quantity)?;
    }

    Ok(Json(CheckoutResponse {
        canteen_name: checkout.label().to_owned(),
        lines: checkout
            .lines()
            .iter()
            .map(|line| CheckoutResponseLine {
                name: line.name().to_owned(),
                price: line.price(),
                quantity: line.quantity(),
                line_total: line.line_total(),
            })
            .collect(),
        item_count: checkout.item_count(),
        subtotal: checkout.subtotal(),
    }))
}
