//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod category;
pub mod snippet;
pub mod user;

pub use category::{CategoryRecord, CategoryRepository, CreateCategory, UpdateCategory};
pub use snippet::{CreateSnippet, SnippetFilter, SnippetRecord, SnippetRepository, UpdateSnippet};
pub use user::{CreateUser, UserRecord, UserRepository};
