use serde_json::{Map, Value};
use thiserror::Error;

/// Untyped event body as delivered by an event listener.
pub type EventPayload = Map<String, Value>;

/// Reasons a raw event payload cannot be decoded into a typed event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventDecodeError {
    /// A required field is absent.
    #[error("event field '{0}' is missing")]
    MissingField(&'static str),

    /// A field is present with the wrong JSON type.
    #[error("event field '{field}' must be a {expected}")]
    InvalidType {
        /// Offending field name.
        field: &'static str,
        /// Expected JSON type.
        expected: &'static str,
    },

    /// A string field is present but blank.
    #[error("event field '{0}' must not be empty")]
    Empty(&'static str),
}

/// Identity-provider notification that a user account was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCreatedEvent {
    email: String,
    superuser: bool,
}

impl UserCreatedEvent {
    /// Event type name used to subscribe to the feed.
    pub const EVENT_NAME: &'static str = "UserCreatedEvent";

    const EMAIL_FIELD: &'static str = "Email";
    const SUPERUSER_FIELD: &'static str = "Superuser";

    /// Creates a typed event.
    #[must_use]
    pub fn new(email: impl Into<String>, superuser: bool) -> Self {
        Self {
            email: email.into(),
            superuser,
        }
    }

    /// Decodes an untyped payload carrying `Email` (string) and `Superuser` (bool).
    pub fn from_payload(payload: &EventPayload) -> Result<Self, EventDecodeError> {
        let email = match payload.get(Self::EMAIL_FIELD) {
            None | Some(Value::Null) => {
                return Err(EventDecodeError::MissingField(Self::EMAIL_FIELD));
            }
            Some(Value::String(email)) if email.trim().is_empty() => {
                return Err(EventDecodeError::Empty(Self::EMAIL_FIELD));
            }
            Some(Value::String(email)) => email.clone(),
            Some(_) => {
                return Err(EventDecodeError::InvalidType {
                    field: Self::EMAIL_FIELD,
                    expected: "string",
                });
            }
        };

        let superuser = match payload.get(Self::SUPERUSER_FIELD) {
            None | Some(Value::Null) => {
                return Err(EventDecodeError::MissingField(Self::SUPERUSER_FIELD));
            }
            Some(Value::Bool(superuser)) => *superuser,
            Some(_) => {
                return Err(EventDecodeError::InvalidType {
                    field: Self::SUPERUSER_FIELD,
                    expected: "boolean",
                });
            }
        };

        Ok(Self { email, superuser })
    }

    /// Returns the created user's email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns whether the created user is a superuser.
    #[must_use]
    pub fn is_superuser(&self) -> bool {
        self.superuser
    }
}
