//! Snippet service
//!
//! Anyone may read snippets. Creating one requires a logged-in user, who
//! becomes its author; only the author may change or delete it.

use crate::db;
use crate::error::ApiError;
use crate::repositories::{
    CategoryRepository, CreateSnippet, SnippetFilter, SnippetRepository, UpdateSnippet,
};
use crate::services::clearable_text;
use snippets_shared::validation::{
    check_field, clean_optional_text, normalize_language, validate_content, validate_description,
    validate_language, validate_title,
};
use snippets_shared::{
    CreateSnippetRequest, PaginatedResponse, Snippet, SnippetsListQuery, UpdateSnippetRequest,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Foreign keys on `snippets`, as named by PostgreSQL
const CATEGORY_FK: &str = "snippets_category_id_fkey";
const AUTHOR_FK: &str = "snippets_author_id_fkey";

/// Snippet service for business logic
pub struct SnippetService;

impl SnippetService {
    fn not_found() -> ApiError {
        ApiError::NotFound("Snippet not found".to_string())
    }

    fn unknown_category() -> ApiError {
        ApiError::field("category_id", "Category does not exist")
    }

    /// Escape `%`, `_` and `\` so user input matches literally inside ILIKE
    pub fn escape_like(input: &str) -> String {
        let mut escaped = String::with_capacity(input.len());
        for c in input.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    fn validated_language(language: Option<String>) -> Result<Option<String>, ApiError> {
        let language = clean_optional_text(language).map(|l| normalize_language(&l));
        if let Some(ref l) = language {
            check_field("language", validate_language(l))?;
        }
        Ok(language)
    }

    fn validated_description(description: Option<String>) -> Result<Option<String>, ApiError> {
        let description = clean_optional_text(description);
        if let Some(ref d) = description {
            check_field("description", validate_description(d))?;
        }
        Ok(description)
    }

    async fn ensure_category(pool: &PgPool, category_id: Uuid) -> Result<(), ApiError> {
        if CategoryRepository::exists(pool, category_id)
            .await
            .map_err(ApiError::Internal)?
        {
            Ok(())
        } else {
            Err(Self::unknown_category())
        }
    }

    async fn owned_snippet(
        pool: &PgPool,
        user_id: Uuid,
        snippet_id: Uuid,
    ) -> Result<Snippet, ApiError> {
        let snippet = Self::get_snippet(pool, snippet_id).await?;

        if !snippet.is_authored_by(user_id) {
            return Err(ApiError::Forbidden(
                "Only the author can modify this snippet".to_string(),
            ));
        }

        Ok(snippet)
    }

    /// Error for a write rejected by one of the snippet foreign keys
    fn foreign_key_error(constraint: &str) -> Option<ApiError> {
        match constraint {
            // Category removed between the existence check and the write
            CATEGORY_FK => Some(Self::unknown_category()),
            // Token still valid but the account is gone
            AUTHOR_FK => Some(ApiError::Unauthorized("User no longer exists".to_string())),
            _ => None,
        }
    }

    fn map_write_error(e: anyhow::Error) -> ApiError {
        db::violated_foreign_key(&e)
            .and_then(|constraint| Self::foreign_key_error(&constraint))
            .unwrap_or(ApiError::Internal(e))
    }

    /// Validate and normalize the fields of a partial update
    fn validated_update(req: UpdateSnippetRequest) -> Result<UpdateSnippet, ApiError> {
        let title = req.title.map(|t| t.trim().to_string());
        if let Some(ref t) = title {
            check_field("title", validate_title(t))?;
        }
        if let Some(ref c) = req.content {
            check_field("content", validate_content(c))?;
        }
        let description = clearable_text("description", req.description, validate_description)?;
        let language = clearable_text(
            "language",
            req.language.map(|l| l.map(|l| normalize_language(&l))),
            validate_language,
        )?;

        Ok(UpdateSnippet {
            category_id: req.category_id,
            title,
            description,
            content: req.content,
            language,
        })
    }

    /// Create a new snippet authored by `user_id`
    pub async fn create_snippet(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateSnippetRequest,
    ) -> Result<Snippet, ApiError> {
        let title = req.title.trim().to_string();
        check_field("title", validate_title(&title))?;
        check_field("content", validate_content(&req.content))?;
        let description = Self::validated_description(req.description)?;
        let language = Self::validated_language(req.language)?;

        Self::ensure_category(pool, req.category_id).await?;

        let input = CreateSnippet {
            author_id: user_id,
            category_id: req.category_id,
            title,
            description,
            content: req.content,
            language,
        };

        let record = SnippetRepository::create(pool, input)
            .await
            .map_err(Self::map_write_error)?;

        info!(snippet_id = %record.id, author_id = %user_id, "Snippet created");

        Ok(record.into())
    }

    /// List snippets with optional filters
    pub async fn list_snippets(
        pool: &PgPool,
        query: SnippetsListQuery,
    ) -> Result<PaginatedResponse<Snippet>, ApiError> {
        let pagination = query.pagination();
        let filter = SnippetFilter {
            category_id: query.category_id,
            language: clean_optional_text(query.language).map(|l| normalize_language(&l)),
            title_pattern: clean_optional_text(query.search).map(|s| Self::escape_like(&s)),
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

    /// Get a specific snippet
    pub async fn get_snippet(pool: &PgPool, snippet_id: Uuid) -> Result<Snippet, ApiError> {
        SnippetRepository::get_by_id(pool, snippet_id)
            .await
            .map_err(ApiError::Internal)?
            .map(Snippet::from)
            .ok_or_else(Self::not_found)
    }

    /// Update a snippet owned by `user_id`
    ///
    /// Existence and ownership are checked before the body is validated, so
    /// strangers get 404/403 whatever they send.
    pub async fn update_snippet(
        pool: &PgPool,
        user_id: Uuid,
        snippet_id: Uuid,
        req: UpdateSnippetRequest,
    ) -> Result<Snippet, ApiError> {
        Self::owned_snippet(pool, user_id, snippet_id).await?;

        let updates = Self::validated_update(req)?;

        if let Some(category_id) = updates.category_id {
            Self::ensure_category(pool, category_id).await?;
        }

        let record = SnippetRepository::update(pool, snippet_id, updates)
            .await
            .map_err(Self::map_write_error)?
            .ok_or_else(Self::not_found)?;

        Ok(record.into())
    }

    /// Delete a snippet owned by `user_id`
    pub async fn delete_snippet(
        pool: &PgPool,
        user_id: Uuid,
        snippet_id: Uuid,
    ) -> Result<(), ApiError> {
        Self::owned_snippet(pool, user_id, snippet_id).await?;

        let deleted = SnippetRepository::delete(pool, snippet_id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(Self::not_found());
        }

        info!(snippet_id = %snippet_id, "Snippet deleted");
        Ok(())
    }
}
