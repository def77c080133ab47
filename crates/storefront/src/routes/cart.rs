//! Cart route handlers.
//!
//! The cart lives in the session under `session_keys::CART` and belongs to a
//! single canteen. Prices always come from the catalog.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use campus_eats_core::{Canteen, CanteenId, Cart};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::state::AppState;

/// Form posted by the +/- buttons on a menu page.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    #[serde(rename = "canteenId")]
    pub canteen_id: CanteenId,
    pub name: String,
}

/// Add one unit of an item.
///
/// Starts a fresh cart when the session cart belongs to another canteen.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<impl IntoResponse> {
    let canteen = load_canteen(&state, form.canteen_id).await?;
    let item = canteen
        .item(&form.name)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown menu item: {}", form.name.trim())))?;

    let mut cart = session
        .get::<Cart>(session_keys::CART)
        .await?
        .filter(|cart| cart.canteen_id() == canteen.id)
        .unwrap_or_else(|| Cart::new(canteen.id, &canteen.name));

    let quantity = cart.add(&item.name, item.price);
    session.insert(session_keys::CART, &cart).await?;

    let quantity = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("item", item.name.as_str()), ("quantity", quantity.as_str())]),
    );

    Ok(Redirect::to(&menu_path(canteen.id)))
}

/// Remove one unit of an item.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<impl IntoResponse> {
    let canteen = load_canteen(&state, form.canteen_id).await?;
    let item = canteen
        .item(&form.name)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown menu item: {}", form.name.trim())))?;

    if let Some(mut cart) = session
        .get::<Cart>(session_keys::CART)
        .await?
        .filter(|cart| cart.canteen_id() == canteen.id)
    {
        let quantity = cart.remove(&item.name);
        session.insert(session_keys::CART, &cart).await?;

        let quantity = quantity.to_string();
        add_breadcrumb(
            "cart",
            "Removed item",
            Some(&[("item", item.name.as_str()), ("quantity", quantity.as_str())]),
        );
    }

    Ok(Redirect::to(&menu_path(canteen.id)))
}

async fn load_canteen(state: &AppState, id: CanteenId) -> Result<Canteen> {
    state
        .catalog()
        .canteen(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("canteen {id}")))
}

fn menu_path(id: CanteenId) -> String {
    format!("/menu/{id}")
}
