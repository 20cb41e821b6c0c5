use warden_core::{AccessToken, AppResult};

/// Port turning a raw bearer token into verified claims.
///
/// Implementations validate signature and expiry; callers never re-check.
pub trait AccessTokenDeserializer: Send + Sync {
    /// Verifies and decodes a raw token.
    fn deserialize(&self, raw_token: &str) -> AppResult<AccessToken>;
}
