use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use warden_application::AccessTokenDeserializer;
use warden_core::{AccessToken, AppError, AppResult};

use crate::error::ApiResult;
use crate::state::AppState;

/// Verified token presented with the current request, if any.
#[derive(Debug, Clone)]
pub struct RequestAccessToken(pub Option<AccessToken>);

pub async fn resolve_access_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let access_token =
        find_access_token(request.headers(), state.access_token_deserializer.as_ref())?;

    request
        .extensions_mut()
        .insert(RequestAccessToken(access_token));
    Ok(next.run(request).await)
}

/// Reads `Authorization: Bearer <token>`.
///
/// An absent or empty header yields no token; a header that is not
/// `<scheme> <token>` is rejected as malformed.
pub fn find_access_token(
    headers: &HeaderMap,
    deserializer: &dyn AccessTokenDeserializer,
) -> AppResult<Option<AccessToken>> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::Validation("Malformed authorization header".to_owned()))?
        .trim();
    if value.is_empty() {
        return Ok(None);
    }

    let mut parts = value.split_whitespace();
    let (Some(scheme), Some(raw_token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AppError::Validation(
            "Malformed authorization header".to_owned(),
        ));
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Validation(
            "Malformed authorization header".to_owned(),
        ));
    }

    deserializer.deserialize(raw_token).map(Some)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};
    use warden_application::AccessTokenDeserializer;
    use warden_core::{AccessToken, AppError, AppResult};

    use super::find_access_token;

    struct EchoDeserializer;

    impl AccessTokenDeserializer for EchoDeserializer {
        fn deserialize(&self, raw_token: &str) -> AppResult<AccessToken> {
            if raw_token == "invalid" {
                return Err(AppError::Unauthorized("invalid access token".to_owned()));
            }

            Ok(AccessToken::new(raw_token, "openid", 0, i64::MAX, "iam"))
        }
    }

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn missing_or_empty_header_yields_no_token() {
        assert!(matches!(
            find_access_token(&HeaderMap::new(), &EchoDeserializer),
            Ok(None)
        ));
        assert!(matches!(
            find_access_token(&headers(""), &EchoDeserializer),
            Ok(None)
        ));
    }

    #[test]
    fn bearer_token_is_deserialized() {
        let token = find_access_token(&headers("Bearer a@x.com"), &EchoDeserializer);
        assert!(matches!(token, Ok(Some(ref token)) if token.subject() == "a@x.com"));
    }

    #[test]
    fn header_without_token_part_is_malformed() {
        let token = find_access_token(&headers("Bearer"), &EchoDeserializer);
        assert!(
            matches!(token, Err(AppError::Validation(ref message)) if message == "Malformed authorization header")
        );
    }

    #[test]
    fn non_bearer_scheme_is_malformed() {
        let token = find_access_token(&headers("Basic abc"), &EchoDeserializer);
        assert!(matches!(token, Err(AppError::Validation(_))));
    }

    #[test]
    fn unverifiable_token_is_unauthorized() {
        let token = find_access_token(&headers("Bearer invalid"), &EchoDeserializer);
        assert!(matches!(token, Err(AppError::Unauthorized(_))));
    }
}
