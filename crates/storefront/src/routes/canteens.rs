//! Canteen listing and menu route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use campus_eats_core::{Canteen, CanteenId, Cart};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Canteen card on the listing page.
#[derive(Clone)]
pub struct CanteenView {
    pub id: CanteenId,
    pub name: String,
    pub address: String,
}

/// Menu row with the quantity currently in the cart.
#[derive(Clone)]
pub struct MenuItemView {
    pub name: String,
    pub price: String,
    pub quantity: u32,
}

// =============================================================================
// Templates
// =============================================================================

/// Canteen listing template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/canteens.html")]
pub struct CanteensTemplate {
    pub current_user: Option<CurrentUser>,
    pub university: String,
    pub canteens: Vec<CanteenView>,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/menu.html")]
pub struct MenuTemplate {
    pub current_user: Option<CurrentUser>,
    pub canteen_id: CanteenId,
    pub canteen_name: String,
    pub address: String,
    pub items: Vec<MenuItemView>,
    pub summary: String,
    pub can_checkout: bool,
    /// One `name|price` token per unit in the cart.
    pub tokens: Vec<String>,
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CanteensQuery {
    pub university: Option<String>,
}

/// List the canteens at a university.
///
/// A missing or blank `university` parameter sends the visitor back to the
/// university list.
#[instrument(skip(state, current_user))]
pub async fn canteens(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Query(query): Query<CanteensQuery>,
) -> Result<Response> {
    let Some(university) = query
        .university
        .map(|u| u.trim().to_owned())
        .filter(|u| !u.is_empty())
    else {
        return Ok(Redirect::to("/").into_response());
    };

    let canteens = state
        .catalog()
        .canteens_at(&university)
        .await?
        .into_iter()
        .map(|canteen| CanteenView {
            id: canteen.id,
            name: canteen.name,
            address: canteen.address,
        })
        .collect();

    Ok(CanteensTemplate {
        current_user,
        university,
        canteens,
    }
    .into_response())
}

/// Render a canteen's menu together with the session cart.
#[instrument(skip(state, session, current_user))]
pub async fn menu(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
    Path(canteen_id): Path<String>,
) -> Result<impl IntoResponse> {
    let canteen = find_canteen(&state, &canteen_id).await?;

    // A cart filled at another canteen is not shown here.
    let cart = session
        .get::<Cart>(session_keys::CART)
        .await?
        .filter(|cart| cart.canteen_id() == canteen.id)
        .unwrap_or_else(|| Cart::new(canteen.id, &canteen.name));

    let items = canteen
        .menu
        .iter()
        .map(|item| MenuItemView {
            name: item.name.clone(),
            price: item.price.to_string(),
            quantity: cart.quantity_of(&item.name),
        })
        .collect();

    let summary = cart.summary();
    let submission = cart.serialize();

    Ok(MenuTemplate {
        current_user,
        canteen_id: canteen.id,
        canteen_name: submission.canteen_name,
        address: canteen.address,
        items,
        summary: summary.to_string(),
        can_checkout: summary.can_checkout(),
        tokens: submission.items.iter().map(ToString::to_string).collect(),
    })
}

/// Resolve a path segment to a canteen; anything that is not a known id is a 404.
async fn find_canteen(state: &AppState, raw_id: &str) -> Result<Canteen> {
    let not_found = || AppError::NotFound(format!("canteen {raw_id}"));
    let id: CanteenId = raw_id.trim().parse().map_err(|_| not_found())?;
    state.catalog().canteen(id).await?.ok_or_else(not_found)
}
