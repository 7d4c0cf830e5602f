//! Category service
//!
//! Category names are unique ignoring case, and a category cannot be removed
//! while snippets are still filed under it.

use crate::db;
use crate::error::ApiError;
use crate::repositories::{
    CategoryRepository, CreateCategory, SnippetFilter, SnippetRepository, UpdateCategory,
};
use crate::services::clearable_text;
use snippets_shared::validation::{
    check_field, clean_optional_text, validate_category_name, validate_description,
};
use snippets_shared::{
    Category, CreateCategoryRequest, PaginatedResponse, Pagination, Snippet, UpdateCategoryRequest,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Category service for business logic
pub struct CategoryService;

impl CategoryService {
    fn name_conflict(name: &str) -> ApiError {
        ApiError::Conflict(format!("Category '{}' already exists", name))
    }

    fn not_found() -> ApiError {
        ApiError::NotFound("Category not found".to_string())
    }

    fn validated_description(description: Option<String>) -> Result<Option<String>, ApiError> {
        let description = clean_optional_text(description);
        if let Some(ref d) = description {
            check_field("description", validate_description(d))?;
        }
        Ok(description)
    }

    /// Create a new category
    pub async fn create_category(
        pool: &PgPool,
        req: CreateCategoryRequest,
    ) -> Result<Category, ApiError> {
        let name = req.name.trim().to_string();
        check_field("name", validate_category_name(&name))?;
        let description = Self::validated_description(req.description)?;

        if CategoryRepository::name_taken(pool, &name, None)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(Self::name_conflict(&name));
        }

        let record = CategoryRepository::create(pool, CreateCategory { name, description })
            .await
            .map_err(|e| {
                if db::is_unique_violation(&e) {
                    ApiError::Conflict("Category already exists".to_string())
                } else {
                    ApiError::Internal(e)
                }
            })?;

        info!(category_id = %record.id, name = %record.name, "Category created");

        Ok(record.into())
    }

    /// List all categories
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, ApiError> {
        let records = CategoryRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Category::from).collect())
    }

    /// Get a specific category
    pub async fn get_category(pool: &PgPool, id: Uuid) -> Result<Category, ApiError> {
        CategoryRepository::get_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .map(Category::from)
            .ok_or_else(Self::not_found)
    }

    /// Update a category
    pub async fn update_category(
        pool: &PgPool,
        id: Uuid,
        req: UpdateCategoryRequest,
    ) -> Result<Category, ApiError> {
        let name = match req.name {
            Some(name) => {
                let name = name.trim().to_string();
                check_field("name", validate_category_name(&name))?;
                if CategoryRepository::name_taken(pool, &name, Some(id))
                    .await
                    .map_err(ApiError::Internal)?
                {
                    return Err(Self::name_conflict(&name));
                }
                Some(name)
            }
            None => None,
        };
        let description = clearable_text("description", req.description, validate_description)?;

        let record = CategoryRepository::update(pool, id, UpdateCategory { name, description })
            .await
            .map_err(|e| {
                if db::is_unique_violation(&e) {
                    ApiError::Conflict("Category already exists".to_string())
                } else {
                    ApiError::Internal(e)
                }
            })?
            .ok_or_else(Self::not_found)?;

        Ok(record.into())
    }

    /// Delete a category that has no snippets
    pub async fn delete_category(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        if !CategoryRepository::exists(pool, id)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(Self::not_found());
        }

        let in_use = CategoryRepository::snippet_count(pool, id)
            .await
            .map_err(ApiError::Internal)?;
        if in_use > 0 {
            return Err(ApiError::Conflict(format!(
                "Category still has {} snippet(s)",
                in_use
            )));
        }

        // The FK is ON DELETE RESTRICT, so a snippet added since the count still blocks this
        let deleted = CategoryRepository::delete(pool, id).await.map_err(|e| {
            if db::is_foreign_key_violation(&e) {
                ApiError::Conflict("Category still has snippets".to_string())
            } else {
                ApiError::Internal(e)
            }
        })?;

        if !deleted {
            return Err(Self::not_found());
        }

        info!(category_id = %id, "Category deleted");
        Ok(())
    }

    /// Snippets filed under a category
    pub async fn list_snippets(
        pool: &PgPool,
        id: Uuid,
        pagination: Pagination,
    ) -> Result<PaginatedResponse<Snippet>, ApiError> {
        if !CategoryRepository::exists(pool, id)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(Self::not_found());
        }

        let filter = SnippetFilter {
            category_id: Some(id),
            ..Default::default()
        };
        let (records, total) = SnippetRepository::list(pool, &filter, pagination)
            .await
            .map_err(ApiError::Internal)?;

        Ok(PaginatedResponse::new(
            records.into_iter().map(Snippet::from).collect(),
            u64::try_from(total).unwrap_or(0),
            pagination,
        ))
    }
}
