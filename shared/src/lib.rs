//! Snippets API Shared Library
//!
//! This crate contains the request/response types, domain models and
//! validation helpers shared by the backend and any Rust client.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{Category, CategorySummary, Snippet, User};
pub use types::*;
