//! Business logic services
//!
//! Services validate input, enforce ownership rules and coordinate
//! repositories.

pub mod category;
pub mod snippet;
pub mod user;

pub use category::CategoryService;
pub use snippet::SnippetService;
pub use user::UserService;

use crate::error::ApiError;
use snippets_shared::validation::{check_field, clean_optional_text};

/// Validate a field that a partial update may clear.
///
/// `None` leaves the column alone; `null` or a blank string clears it.
pub(crate) fn clearable_text(
    field: &str,
    value: Option<Option<String>>,
    validate: impl Fn(&str) -> Result<(), String>,
) -> Result<Option<Option<String>>, ApiError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let cleaned = clean_optional_text(value);
    if let Some(ref text) = cleaned {
        check_field(field, validate(text))?;
    }
    Ok(Some(cleaned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snippets_shared::validation::validate_description;

    #[test]
    fn test_clearable_text() {
        assert_eq!(clearable_text("description", None, validate_description).unwrap(), None);
        assert_eq!(
            clearable_text("description", Some(None), validate_description).unwrap(),
            Some(None)
        );
        assert_eq!(
            clearable_text("description", Some(Some("   ".to_string())), validate_description)
                .unwrap(),
            Some(None)
        );
        assert_eq!(
            clearable_text("description", Some(Some(" kept ".to_string())), validate_description)
                .unwrap(),
            Some(Some("kept".to_string()))
        );

        let err = clearable_text(
            "description",
            Some(Some("d".repeat(1001))),
            validate_description,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidField(ref e) if e.field == "description"));
    }
}
