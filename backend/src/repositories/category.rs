//! Category repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use snippets_shared::Category;
use sqlx::PgPool;
use uuid::Uuid;

/// Category record, with the number of snippets filed under it
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub snippet_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Category {
            id: record.id,
            name: record.name,
            description: record.description,
            snippet_count: record.snippet_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
}

/// Input for updating a category
///
/// `description: Some(None)` clears the column; `None` leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

/// Category repository
pub struct CategoryRepository;

impl CategoryRepository {
    /// Create a new category
    pub async fn create(pool: &PgPool, input: CreateCategory) -> Result<CategoryRecord> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, 0::BIGINT AS snippet_count,
                      created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get a category by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<CategoryRecord>> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            r#"
            SELECT c.id, c.name, c.description,
                   (SELECT COUNT(*) FROM snippets s WHERE s.category_id = c.id) AS snippet_count,
                   c.created_at, c.updated_at
            FROM categories c
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List all categories ordered by name
    pub async fn list(pool: &PgPool) -> Result<Vec<CategoryRecord>> {
        let records = sqlx::query_as::<_, CategoryRecord>(
            r#"
            SELECT c.id, c.name, c.description,
                   COUNT(s.id) AS snippet_count,
                   c.created_at, c.updated_at
            FROM categories c
            LEFT JOIN snippets s ON s.category_id = c.id
            GROUP BY c.id
            ORDER BY LOWER(c.name) ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Check whether a category exists
    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)"#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Check whether another category already uses this name (case-insensitive)
    pub async fn name_taken(pool: &PgPool, name: &str, exclude: Option<Uuid>) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE LOWER(name) = LOWER($1)
                  AND ($2::UUID IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Update a category
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateCategory,
    ) -> Result<Option<CategoryRecord>> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            r#"
            UPDATE categories SET
                name = COALESCE($2, name),
                description = CASE WHEN $4 THEN $3 ELSE description END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description,
                      (SELECT COUNT(*) FROM snippets s WHERE s.category_id = categories.id)
                          AS snippet_count,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&updates.name)
        .bind(updates.description.as_ref().and_then(|d| d.as_deref()))
        .bind(updates.description.is_some())
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Count snippets filed under a category
    pub async fn snippet_count(pool: &PgPool, id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM snippets WHERE category_id = $1"#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Delete a category
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM categories WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
