//! Input validation for board forms.

use thiserror::Error;

/// Maximum board name length (in characters).
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum board description length (in characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or whitespace.
    #[error("board name is required")]
    NameEmpty,

    /// Name is too long.
    #[error("board name must be at most {MAX_NAME_LENGTH} characters")]
    NameTooLong,

    /// Name contains control characters.
    #[error("board name contains invalid characters")]
    NameInvalidChars,

    /// Description is too long.
    #[error("description must be at most {MAX_DESCRIPTION_LENGTH} characters")]
    DescriptionTooLong,
}

/// Validate a board name.
///
/// # Examples
///
/// ```
/// use boardtree::board::validate_name;
///
/// assert!(validate_name("Premier League").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(ValidationError::NameInvalidChars);
    }
    Ok(())
}

/// Validate an optional description.
pub fn validate_description(description: Option<&str>) -> Result<(), ValidationError> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LENGTH => {
            Err(ValidationError::DescriptionTooLong)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Sports").is_ok());
        assert!(validate_name("Liverpool FC!!").is_ok());
        assert!(validate_name("サッカー").is_ok());
    }

    #[test]
    fn test_validate_name_empty() {
        assert_eq!(validate_name(""), Err(ValidationError::NameEmpty));
        assert_eq!(validate_name(" \t "), Err(ValidationError::NameEmpty));
    }

    #[test]
    fn test_validate_name_too_long() {
        let long_name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(validate_name(&long_name), Err(ValidationError::NameTooLong));

        let exact = "a".repeat(MAX_NAME_LENGTH);
        assert!(validate_name(&exact).is_ok());
    }

    #[test]
    fn test_validate_name_control_chars() {
        assert_eq!(
            validate_name("Line\nBreak"),
            Err(ValidationError::NameInvalidChars)
        );
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("short")).is_ok());

        let long = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert_eq!(
            validate_description(Some(&long)),
            Err(ValidationError::DescriptionTooLong)
        );
    }
}
