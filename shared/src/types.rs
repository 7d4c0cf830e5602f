//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::{Category, CategorySummary, Snippet, User};

/// Tell an explicit `null` apart from an absent field.
///
/// Absent stays `None` through `#[serde(default)]`; `null` becomes `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Default page size for list endpoints
pub const DEFAULT_PER_PAGE: u32 = 20;
/// Largest page size a client may request
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Build pagination from optional query values, clamping out-of-range input
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL LIMIT value
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// SQL OFFSET value
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, pagination: Pagination) -> Self {
        let per_page = u64::from(pagination.per_page.max(1));
        let total_pages = total.div_ceil(per_page);

        Self {
            data,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    /// Convert the items while keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "firstName", alias = "firstname")]
    pub first_name: String,
    #[serde(alias = "lastName", alias = "lastname")]
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token issued on successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// User profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            picture: user.picture,
            created_at: user.created_at,
        }
    }
}

/// Body of the protected demo route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretResponse {
    pub msg: String,
}

// ============================================================================
// Category Types
// ============================================================================

/// Create category request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Update category request (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `null` or a blank string clears the description
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

/// Category response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub snippet_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            description: category.description,
            snippet_count: category.snippet_count,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Categories list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesListResponse {
    pub categories: Vec<CategoryResponse>,
}

// ============================================================================
// Snippet Types
// ============================================================================

/// Create snippet request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnippetRequest {
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Update snippet request (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSnippetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    /// `null` or a blank string clears the description
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    /// `null` or a blank string clears the language
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<Option<String>>,
}

/// Snippet list query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetsListQuery {
    pub category_id: Option<Uuid>,
    pub language: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SnippetsListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

/// Page query for nested listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

/// Snippet response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub category: CategorySummary,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Snippet> for SnippetResponse {
    fn from(snippet: Snippet) -> Self {
        Self {
            id: snippet.id.to_string(),
            title: snippet.title,
            description: snippet.description,
            content: snippet.content,
            language: snippet.language,
            category: snippet.category,
            author_id: snippet.author_id.to_string(),
            created_at: snippet.created_at,
            updated_at: snippet.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_register_request_accepts_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","password":"password123"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Ada");
        assert_eq!(req.last_name, "Lovelace");
        assert!(req.picture.is_none());
    }

    #[test]
    fn test_register_request_accepts_lowercase_aliases() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"firstname":"Ada","lastname":"Lovelace","email":"ada@example.com","password":"password123"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Ada");
    }

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::new(None, None);
        assert_eq!(p, Pagination::default());
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 20);
    }

    #[test]
    fn test_pagination_offset() {
        let p = Pagination::new(Some(3), Some(10));
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn test_paginated_response_total_pages() {
        let resp = PaginatedResponse::new(vec![1, 2, 3], 41, Pagination::new(Some(1), Some(20)));
        assert_eq!(resp.total_pages, 3);

        let empty: PaginatedResponse<i32> =
            PaginatedResponse::new(vec![], 0, Pagination::default());
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_update_snippet_request_all_optional() {
        let req: UpdateSnippetRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());
        assert!(req.category_id.is_none());
        assert!(req.description.is_none());
    }

    #[test]
    fn test_update_request_null_means_clear() {
        let req: UpdateSnippetRequest =
            serde_json::from_str(r#"{"description":null,"language":"rust"}"#).unwrap();
        assert_eq!(req.description, Some(None));
        assert_eq!(req.language, Some(Some("rust".to_string())));

        let req: UpdateCategoryRequest = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(req.description, Some(None));
        assert!(req.name.is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_pagination_always_in_range(page in any::<Option<u32>>(), per_page in any::<Option<u32>>()) {
            let p = Pagination::new(page, per_page);
            prop_assert!(p.page >= 1);
            prop_assert!(p.per_page >= 1 && p.per_page <= MAX_PER_PAGE);
            prop_assert!(p.offset() >= 0);
        }
    }
}
