//! Authentication route handlers.
//!
//! Password signup, login and logout. Validation failures are rendered inline
//! on the form page; storage failures become an `AppError`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthError;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub error: Option<String>,
    pub email: String,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub current_user: Option<CurrentUser>,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    SignupTemplate {
        current_user,
        error: None,
        name: String::new(),
        email: String::new(),
    }
}

/// Handle signup form submission.
#[instrument(skip(state, current_user, form))]
pub async fn signup(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let result = state
        .auth()
        .register_with_password(&form.name, &form.email, &form.password)
        .await;

    let message = match result {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Account created");
            return Ok(Redirect::to("/login").into_response());
        }
        Err(err) => match signup_message(&err) {
            Some(message) => message,
            None => return Err(err.into()),
        },
    };

    tracing::debug!(error = %message, "Signup rejected");
    Ok(SignupTemplate {
        current_user,
        error: Some(message),
        name: form.name,
        email: form.email,
    }
    .into_response())
}

/// Inline text for signup failures the visitor can fix.
fn signup_message(err: &AuthError) -> Option<String> {
    let message = match err {
        AuthError::UserAlreadyExists => {
            "This email is already taken. Please try another.".to_owned()
        }
        AuthError::InvalidEmail(_) => "Please enter a valid email address.".to_owned(),
        AuthError::MissingName => "Please enter your name.".to_owned(),
        AuthError::MissingPassword => "Please enter a password.".to_owned(),
        AuthError::InvalidCredentials | AuthError::Repository(_) | AuthError::PasswordHash => {
            return None;
        }
    };
    Some(message)
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    LoginTemplate {
        current_user,
        error: None,
        email: String::new(),
    }
}

/// Handle login form submission.
///
/// On success the session id is cycled before the user is stored.
#[instrument(skip(state, session, current_user, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state
        .auth()
        .login_with_password(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            let current = CurrentUser::from(&user);
            set_current_user(&session, &current).await?;
            set_sentry_user(&current.id, Some(current.email.as_str()));
            tracing::info!(user_id = %current.id, "User logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::debug!("Login rejected");
            Ok(LoginTemplate {
                current_user,
                error: Some("Invalid email or password.".to_owned()),
                email: form.email,
            }
            .into_response())
        }
        Err(err) => Err(AppError::from(err)),
    }
}

/// Destroy the session and return home.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}
