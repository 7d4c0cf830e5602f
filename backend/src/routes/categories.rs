//! Category API routes
//!
//! Reads are public. Writes need a bearer token but no ownership.

use super::parse_id;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::CategoryService;
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
    CategoriesListResponse, CategoryResponse, CreateCategoryRequest, PageQuery,
    PaginatedResponse, SnippetResponse, UpdateCategoryRequest,
};

/// Create category routes
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/:id/snippets", get(list_category_snippets))
}

/// GET /v1/categories
async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesListResponse>, ApiError> {
    let categories = CategoryService::list_categories(state.db()).await?;

    Ok(Json(CategoriesListResponse {
        categories: categories.into_iter().map(CategoryResponse::from).collect(),
    }))
}

/// POST /v1/categories
async fn create_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let Json(req) = payload?;
    let category = CategoryService::create_category(state.db(), req).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// GET /v1/categories/:id
async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category_id = parse_id(&id, "category")?;
    let category = CategoryService::get_category(state.db(), category_id).await?;
    Ok(Json(category.into()))
}

/// PUT /v1/categories/:id
async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category_id = parse_id(&id, "category")?;
    let Json(req) = payload?;

    let category = CategoryService::update_category(state.db(), category_id, req).await?;
    tracing::debug!(category_id = %category_id, user_id = %auth.user_id, "Category updated");

    Ok(Json(category.into()))
}

/// DELETE /v1/categories/:id
async fn delete_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let category_id = parse_id(&id, "category")?;
    CategoryService::delete_category(state.db(), category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/categories/:id/snippets
async fn list_category_snippets(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<SnippetResponse>>, ApiError> {
    let category_id = parse_id(&id, "category")?;
    let Query(query) = query?;

    let page =
        CategoryService::list_snippets(state.db(), category_id, query.pagination()).await?;

    Ok(Json(page.map(SnippetResponse::from)))
}
