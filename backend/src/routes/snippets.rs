//! Snippet API routes

use super::parse_id;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::SnippetService;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use snippets_shared::{
    CreateSnippetRequest, PaginatedResponse, SnippetResponse, SnippetsListQuery,
    UpdateSnippetRequest,
};

/// Create snippet routes
pub fn snippet_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_snippets).post(create_snippet))
        .route(
            "/:id",
            get(get_snippet).put(update_snippet).delete(delete_snippet),
        )
}

/// GET /v1/snippets - newest first, filterable by category, language and title
async fn list_snippets(
    State(state): State<AppState>,
    query: Result<Query<SnippetsListQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<SnippetResponse>>, ApiError> {
    let Query(query) = query?;
    let page = SnippetService::list_snippets(state.db(), query).await?;
    Ok(Json(page.map(SnippetResponse::from)))
}

/// POST /v1/snippets
async fn create_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateSnippetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SnippetResponse>), ApiError> {
    let Json(req) = payload?;
    let snippet = SnippetService::create_snippet(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(snippet.into())))
}

/// GET /v1/snippets/:id
async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SnippetResponse>, ApiError> {
    let snippet_id = parse_id(&id, "snippet")?;
    let snippet = SnippetService::get_snippet(state.db(), snippet_id).await?;
    Ok(Json(snippet.into()))
}

/// PUT /v1/snippets/:id - author only
async fn update_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSnippetRequest>, JsonRejection>,
) -> Result<Json<SnippetResponse>, ApiError> {
    let snippet_id = parse_id(&id, "snippet")?;
    let Json(req) = payload?;

    let snippet = SnippetService::update_snippet(state.db(), auth.user_id, snippet_id, req).await?;

    Ok(Json(snippet.into()))
}

/// DELETE /v1/snippets/:id - author only
async fn delete_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let snippet_id = parse_id(&id, "snippet")?;
    SnippetService::delete_snippet(state.db(), auth.user_id, snippet_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
