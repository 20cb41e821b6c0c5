//! RS256 access-token verification against the identity provider's signing key.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use warden_application::AccessTokenDeserializer;
use warden_core::{AccessToken, AppError, AppResult};

mod jwks;

pub use jwks::load_iam_signing_key;

#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    exp: i64,
    #[serde(default)]
    iat: i64,
    #[serde(default)]
    iss: String,
    #[serde(default)]
    scope: String,
}

/// Verifies RS256 bearer tokens and maps their claims to [`AccessToken`].
#[derive(Clone)]
pub struct JwtAccessTokenDeserializer {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAccessTokenDeserializer {
    /// Creates a deserializer for the given public key.
    ///
    /// When `issuer` is set, tokens from any other issuer are rejected.
    #[must_use]
    pub fn new(decoding_key: DecodingKey, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key,
            validation,
        }
    }

    /// Fetches the identity provider's signing key and builds a deserializer for it.
    pub async fn from_iam(
        client: &reqwest::Client,
        iam_base_path: &str,
        issuer: Option<&str>,
    ) -> AppResult<Self> {
        let decoding_key = load_iam_signing_key(client, iam_base_path).await?;
        Ok(Self::new(decoding_key, issuer))
    }
}

impl AccessTokenDeserializer for JwtAccessTokenDeserializer {
    fn deserialize(&self, raw_token: &str) -> AppResult<AccessToken> {
        let token_data =
            decode::<AccessTokenClaims>(raw_token, &self.decoding_key, &self.validation)
                .map_err(|error| AppError::Unauthorized(format!("invalid access token: {error}")))?;

        let claims = token_data.claims;
        Ok(AccessToken::new(
            claims.sub,
            claims.scope,
            claims.iat,
            claims.exp,
            claims.iss,
        ))
    }
}
