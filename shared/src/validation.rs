//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Each validator returns a human-readable message on failure; callers attach
//! the offending field through [`ValidationError`].

use std::sync::OnceLock;
use validator::ValidateUrl;

/// Maximum length of a user's first or last name
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LEN: usize = 100;
/// Maximum length of a snippet title
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum length of any free-text description
pub const MAX_DESCRIPTION_LEN: usize = 1000;
/// Maximum size of a snippet body in characters
pub const MAX_CONTENT_LEN: usize = 100_000;
/// Maximum length of a language tag
pub const MAX_LANGUAGE_LEN: usize = 50;
/// bcrypt ignores everything past this many bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

fn email_regex() -> &'static regex_lite::Regex {
    static EMAIL: OnceLock<regex_lite::Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email_regex().is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        ));
    }
    Ok(())
}

/// Validate a required short text field (trimmed, non-empty, bounded)
pub fn validate_required_text(value: &str, max_len: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Cannot be empty".to_string());
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("Must be at most {} characters", max_len));
    }
    Ok(())
}

/// Validate a person's first or last name
pub fn validate_person_name(name: &str) -> Result<(), String> {
    validate_required_text(name, MAX_NAME_LEN)
}

/// Validate a category name
pub fn validate_category_name(name: &str) -> Result<(), String> {
    validate_required_text(name, MAX_CATEGORY_NAME_LEN)
}

/// Validate a snippet title
pub fn validate_title(title: &str) -> Result<(), String> {
    validate_required_text(title, MAX_TITLE_LEN)
}

/// Validate a snippet body
///
/// Leading and trailing whitespace is significant in code, so the body is
/// never trimmed; it only has to contain something other than whitespace.
pub fn validate_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Content cannot be empty".to_string());
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(format!("Content must be at most {} characters", MAX_CONTENT_LEN));
    }
    Ok(())
}

/// Validate an optional description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        ));
    }
    Ok(())
}

/// Normalize a language tag (trimmed, lowercase)
pub fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}

/// Validate a normalized language tag such as `rust`, `c++`, `c#` or `objective-c`
pub fn validate_language(language: &str) -> Result<(), String> {
    if language.is_empty() {
        return Err("Language cannot be empty".to_string());
    }
    if language.len() > MAX_LANGUAGE_LEN {
        return Err(format!("Language must be at most {} characters", MAX_LANGUAGE_LEN));
    }
    let valid = language
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "+#._-".contains(c));
    if !valid {
        return Err("Language may only contain a-z, 0-9 and + # . _ -".to_string());
    }
    Ok(())
}

/// Validate a profile picture URL
pub fn validate_picture_url(url: &str) -> Result<(), String> {
    if !url.validate_url() {
        return Err("Picture must be a valid URL".to_string());
    }
    Ok(())
}

/// Trim optional free text, turning blank input into `None`
pub fn clean_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "email" => "Email",
        "password" => "Password",
        "first_name" => "First Name",
        "last_name" => "Last Name",
        "picture" => "Picture",
        "name" => "Name",
        "title" => "Title",
        "content" => "Content",
        "description" => "Description",
        "language" => "Language",
        "category_id" => "Category",
        "id" => "Identifier",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Run a validator and attach the field name to its failure
pub fn check_field(
    field: &str,
    result: Result<(), String>,
) -> Result<(), ValidationError> {
    result.map_err(|message| ValidationError::new(field, &message))
}
