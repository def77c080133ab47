//! Static information pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;

/// Help page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/help.html")]
pub struct HelpTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Deliverers page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/deliverers.html")]
pub struct DeliverersTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Canteen partnership page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/add_canteen.html")]
pub struct AddCanteenTemplate {
    pub current_user: Option<CurrentUser>,
}

pub async fn help(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    HelpTemplate { current_user }
}

pub async fn deliverers(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    DeliverersTemplate { current_user }
}

/// Display the page inviting canteens to list on the platform.
pub async fn add_canteen(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    AddCanteenTemplate { current_user }
}
