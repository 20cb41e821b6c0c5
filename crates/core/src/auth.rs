use serde::{Deserialize, Serialize};

/// Verified identity claim presented with a request.
///
/// Instances are produced by an access-token deserializer after signature and
/// expiry validation; holders of an `AccessToken` treat it as trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    subject: String,
    scope: String,
    issued_at: i64,
    expires_at: i64,
    issuer: String,
}

impl AccessToken {
    /// Creates an access token from verified claims.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        scope: impl Into<String>,
        issued_at: i64,
        expires_at: i64,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            scope: scope.into(),
            issued_at,
            expires_at,
            issuer: issuer.into(),
        }
    }

    /// Returns the subject claim, which is the user's email.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the granted scope.
    #[must_use]
    pub fn scope(&self) -> &str {
        self.scope.as_str()
    }

    /// Returns the issuance time in seconds since the Unix epoch.
    #[must_use]
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Returns the expiry time in seconds since the Unix epoch.
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Returns the issuer claim.
    #[must_use]
    pub fn issuer(&self) -> &str {
        self.issuer.as_str()
    }
}
