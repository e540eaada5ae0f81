//! Validation rules for team fields

use thiserror::Error;

/// Minimum length for team name and description
pub const MIN_LEN: usize = 3;
/// Maximum length for team name and description
pub const MAX_LEN: usize = 35;

/// Validation errors for team fields
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeamValidationError {
    #[error("Team name must be between {MIN_LEN} and {MAX_LEN} characters long")]
    InvalidNameLength,

    #[error("Team description must be between {MIN_LEN} and {MAX_LEN} characters long")]
    InvalidDescriptionLength,

    #[error("Team name must not be blank")]
    BlankName,
}

/// Validate a team name (3-35 characters, not blank)
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::BlankName);
    }

    let len = name.chars().count();

    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(TeamValidationError::InvalidNameLength);
    }

    Ok(())
}

/// Validate a team description (3-35 characters)
pub fn validate_team_description(description: &str) -> Result<(), TeamValidationError> {
    let len = description.chars().count();

    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(TeamValidationError::InvalidDescriptionLength);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(validate_team_name("abc").is_ok());
        assert!(validate_team_name("My Crowdsourcing Team").is_ok());
        assert!(validate_team_name(&"x".repeat(35)).is_ok());
    }

    #[test]
    fn test_name_too_short() {
        assert_eq!(
            validate_team_name("ab"),
            Err(TeamValidationError::InvalidNameLength)
        );
    }

    #[test]
    fn test_name_too_long() {
        assert_eq!(
            validate_team_name(&"x".repeat(36)),
            Err(TeamValidationError::InvalidNameLength)
        );
    }

    #[test]
    fn test_blank_name() {
        assert_eq!(validate_team_name("   "), Err(TeamValidationError::BlankName));
        assert_eq!(validate_team_name(""), Err(TeamValidationError::BlankName));
    }

    #[test]
    fn test_description_bounds() {
        assert!(validate_team_description("abc").is_ok());
        assert_eq!(
            validate_team_description("ab"),
            Err(TeamValidationError::InvalidDescriptionLength)
        );
        assert_eq!(
            validate_team_description(&"x".repeat(36)),
            Err(TeamValidationError::InvalidDescriptionLength)
        );
    }

    #[test]
    fn test_multibyte_names_count_chars() {
        // 3 chars, more than 3 bytes
        assert!(validate_team_name("äöü").is_ok());
    }
}
