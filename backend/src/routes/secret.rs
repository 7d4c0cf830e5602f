//! Demo route guarded by the auth middleware

use crate::auth::{auth_middleware, AuthUser};
use crate::state::AppState;
use axum::{middleware, routing::get, Extension, Json, Router};
use snippets_shared::SecretResponse;
use tracing::debug;

/// Every route in here sits behind `auth_middleware`
pub fn secret_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/secret", get(secret))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// GET /v1/secret/secret
async fn secret(Extension(user): Extension<AuthUser>) -> Json<SecretResponse> {
    debug!(user_id = %user.user_id, "Secret route accessed");
    Json(SecretResponse {
        msg: "Congratulations, you have access to this route".to_string(),
    })
}
