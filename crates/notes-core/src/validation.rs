//! Field validation rules for note titles and content.

use thiserror::Error;

/// Maximum length of a note title, in characters.
pub const MAX_TITLE_LEN: usize = 256;

/// Input that fails the required-field or non-empty constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was not provided.
    #[error("field `{field}` is required")]
    Missing { field: &'static str },

    /// A field was provided but is empty after trimming whitespace.
    #[error("field `{field}` must not be empty")]
    Empty { field: &'static str },

    /// A field exceeds its maximum length.
    #[error("field `{field}` must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Check a title value.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    require_non_empty("title", title)?;

    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title",
            max: MAX_TITLE_LEN,
            actual: len,
        });
    }
    Ok(())
}

/// Check a content value.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    require_non_empty("content", content)
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_accepts_regular_text() {
        assert!(validate_title("Groceries").is_ok());
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(
            validate_title(" \t\n "),
            Err(ValidationError::Empty { field: "title" })
        );
        assert_eq!(
            validate_content("   "),
            Err(ValidationError::Empty { field: "content" })
        );
    }

    #[test]
    fn test_title_length_counts_characters() {
        let at_limit = "é".repeat(MAX_TITLE_LEN);
        assert!(validate_title(&at_limit).is_ok());

        let over = "a".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(
            validate_title(&over),
            Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
                actual: MAX_TITLE_LEN + 1,
            })
        );
    }

    #[test]
    fn test_content_has_no_length_limit() {
        assert!(validate_content(&"x".repeat(100_000)).is_ok());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ValidationError::Missing { field: "content" };
        assert_eq!(err.to_string(), "field `content` is required");
    }
}
