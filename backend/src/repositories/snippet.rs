//! Snippet repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use snippets_shared::{CategorySummary, Pagination, Snippet};
use sqlx::PgPool;
use uuid::Uuid;

/// Snippet record joined with its category name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SnippetRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub language: Option<String>,
    pub category_id: Uuid,
    pub category_name: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SnippetRecord> for Snippet {
    fn from(record: SnippetRecord) -> Self {
        Snippet {
            id: record.id,
            title: record.title,
            description: record.description,
            content: record.content,
            language: record.language,
            category: CategorySummary {
                id: record.category_id,
                name: record.category_name,
            },
            author_id: record.author_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating a snippet
#[derive(Debug, Clone)]
pub struct CreateSnippet {
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub language: Option<String>,
}

/// Input for updating a snippet
///
/// For the nullable columns `Some(None)` clears the value and `None` keeps it.
#[derive(Debug, Clone, Default)]
pub struct UpdateSnippet {
    pub category_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub content: Option<String>,
    pub language: Option<Option<String>>,
}

/// Filters for listing snippets
#[derive(Debug, Clone, Default)]
pub struct SnippetFilter {
    pub category_id: Option<Uuid>,
    pub language: Option<String>,
    /// Already escaped for use inside an ILIKE pattern
    pub title_pattern: Option<String>,
}

/// Snippet repository
pub struct SnippetRepository;

impl SnippetRepository {
    /// Create a new snippet
    pub async fn create(pool: &PgPool, input: CreateSnippet) -> Result<SnippetRecord> {
        let record = sqlx::query_as::<_, SnippetRecord>(
            r#"
            WITH inserted AS (
                INSERT INTO snippets (author_id, category_id, title, description, content, language)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT i.id, i.title, i.description, i.content, i.language,
                   i.category_id, c.name AS category_name, i.author_id,
                   i.created_at, i.updated_at
            FROM inserted i
            JOIN categories c ON c.id = i.category_id
            "#,
        )
        .bind(input.author_id)
        .bind(input.category_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.content)
        .bind(&input.language)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get a snippet by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<SnippetRecord>> {
        let record = sqlx::query_as::<_, SnippetRecord>(
            r#"
            SELECT s.id, s.title, s.description, s.content, s.language,
                   s.category_id, c.name AS category_name, s.author_id,
                   s.created_at, s.updated_at
            FROM snippets s
            JOIN categories c ON c.id = s.category_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List snippets matching `filter`, newest first
    pub async fn list(
        pool: &PgPool,
        filter: &SnippetFilter,
        pagination: Pagination,
    ) -> Result<(Vec<SnippetRecord>, i64)> {
        let records = sqlx::query_as::<_, SnippetRecord>(
            r#"
            SELECT s.id, s.title, s.description, s.content, s.language,
                   s.category_id, c.name AS category_name, s.author_id,
                   s.created_at, s.updated_at
            FROM snippets s
            JOIN categories c ON c.id = s.category_id
            WHERE ($1::UUID IS NULL OR s.category_id = $1)
              AND ($2::TEXT IS NULL OR s.language = $2)
              AND ($3::TEXT IS NULL OR s.title ILIKE '%' || $3 || '%')
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filter.category_id)
        .bind(&filter.language)
        .bind(&filter.title_pattern)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM snippets s
            WHERE ($1::UUID IS NULL OR s.category_id = $1)
              AND ($2::TEXT IS NULL OR s.language = $2)
              AND ($3::TEXT IS NULL OR s.title ILIKE '%' || $3 || '%')
            "#,
        )
        .bind(filter.category_id)
        .bind(&filter.language)
        .bind(&filter.title_pattern)
        .fetch_one(pool)
        .await?;

        Ok((records, total))
    }

    /// Update a snippet
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateSnippet,
    ) -> Result<Option<SnippetRecord>> {
        let record = sqlx::query_as::<_, SnippetRecord>(
            r#"
            WITH updated AS (
                UPDATE snippets SET
                    category_id = COALESCE($2, category_id),
                    title = COALESCE($3, title),
                    description = CASE WHEN $7 THEN $4 ELSE description END,
                    content = COALESCE($5, content),
                    language = CASE WHEN $8 THEN $6 ELSE language END,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT u.id, u.title, u.description, u.content, u.language,
                   u.category_id, c.name AS category_name, u.author_id,
                   u.created_at, u.updated_at
            FROM updated u
            JOIN categories c ON c.id = u.category_id
            "#,
        )
        .bind(id)
        .bind(updates.category_id)
        .bind(&updates.title)
        .bind(updates.description.as_ref().and_then(|d| d.as_deref()))
        .bind(&updates.content)
        .bind(updates.language.as_ref().and_then(|l| l.as_deref()))
        .bind(updates.description.is_some())
        .bind(updates.language.is_some())
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete a snippet
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM snippets WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
