//! Authentication routes
//!
//! Registration and login are public; `/me` needs a bearer token.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use snippets_shared::{AuthToken, LoginRequest, RegisterRequest, UserProfile};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_profile))
}

/// Register a new user
///
/// POST /v1/auth/register
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let Json(req) = payload?;
    let user = UserService::register(state.db(), state.passwords(), req).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchange email and password for an access token
///
/// POST /v1/auth/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthToken>> {
    let Json(req) = payload?;
    let token = UserService::login(state.db(), state.jwt(), &req.email, &req.password).await?;
    Ok(Json(token))
}

/// GET /v1/auth/me
async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<UserProfile>> {
    let user = UserService::get_profile(state.db(), auth_user.user_id).await?;
    Ok(Json(user.into()))
}
