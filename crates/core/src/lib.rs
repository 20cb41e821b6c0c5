//! Shared primitives for all Rust crates in Warden.

#![forbid(unsafe_code)]

/// Access-token primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::AccessToken;

/// Result type used across Warden crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string. Surrounding whitespace is trimmed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller presented no identity, or one that does not resolve to a known user.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Identified user lacks a required permission.
    #[error("user {email} is not authorized for {permission}")]
    Authorization {
        /// Email of the denied user.
        email: String,
        /// First required permission the user does not hold.
        permission: String,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds the error used when an operation needs an identity it cannot resolve.
    #[must_use]
    pub fn authentication_required() -> Self {
        Self::Unauthorized("authentication required".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_string_trims_surrounding_whitespace() {
        let value = NonEmptyString::new("  role.create ");
        assert!(matches!(value, Ok(ref value) if value.as_str() == "role.create"));
    }

    #[test]
    fn authorization_error_names_user_and_permission() {
        let error = AppError::Authorization {
            email: "a@x.com".to_owned(),
            permission: "P2".to_owned(),
        };

        assert_eq!(error.to_string(), "user a@x.com is not authorized for P2");
    }
}
