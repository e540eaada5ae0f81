use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// The (user, team) pair already has a membership row. Callers treat
    /// this as "already joined" rather than a hard failure.
    #[error("Duplicate membership: {message}")]
    DuplicateMembership { message: String },

    /// Bad signature, wrong purpose or expired. The message never
    /// distinguishes a forged token from a merely expired one.
    #[error("The invitation is invalid or has expired")]
    InvalidToken,

    /// Mail delivery failed. Non-fatal at the workflow boundary.
    #[error("Delivery failure: {message}")]
    Delivery { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn duplicate_membership(message: impl Into<String>) -> Self {
        Self::DuplicateMembership {
            message: message.into(),
        }
    }

    pub fn invalid_token() -> Self {
        Self::InvalidToken
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Team 'alpha' not found");
        assert_eq!(error.to_string(), "Not found: Team 'alpha' not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_duplicate_membership_error() {
        let error = DomainError::duplicate_membership("already a member");
        assert_eq!(error.to_string(), "Duplicate membership: already a member");
    }

    #[test]
    fn test_invalid_token_hides_cause() {
        // Expired and forged tokens must render the same user-visible text
        let error = DomainError::invalid_token();
        assert_eq!(error.to_string(), "The invitation is invalid or has expired");
    }
}
