//! Authentication route handlers: register, login, logout.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Register a new account and log it in.
#[instrument(skip(state, session, req))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<CurrentUser>)> {
    let user = AuthService::new(state.pool())
        .register_with_password(&req.name, &req.email, &req.password)
        .await?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current).await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(current)))
}

/// Log in with email and password.
#[instrument(skip(state, session, req))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<CurrentUser>> {
    let user = AuthService::new(state.pool())
        .login_with_password(&req.email, &req.password)
        .await?;

    // Fresh session id on privilege change.
    session.cycle_id().await?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current).await?;

    Ok(Json(current))
}

/// Who is logged in, if anyone.
pub async fn me(OptionalAuth(user): OptionalAuth) -> Json<Option<CurrentUser>> {
    Json(user)
}

/// Log out, destroying the session (and with it the cart).
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session).await?;
    session.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}
