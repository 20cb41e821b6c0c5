use jsonwebtoken::DecodingKey;
use serde::Deserialize;

use warden_core::{AppError, AppResult};

const JWKS_PATH: &str = "/jwks";

#[derive(Debug, Deserialize)]
pub(super) struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    #[serde(rename = "use")]
    key_use: Option<String>,
    n: Option<String>,
    e: Option<String>,
}

/// Downloads `{iam_base_path}/jwks` and returns the RSA key marked for signatures.
pub async fn load_iam_signing_key(
    client: &reqwest::Client,
    iam_base_path: &str,
) -> AppResult<DecodingKey> {
    let url = format!("{}{JWKS_PATH}", iam_base_path.trim_end_matches('/'));

    let jwks = client
        .get(url.as_str())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|error| AppError::Internal(format!("failed to fetch jwks from '{url}': {error}")))?
        .json::<JwkSet>()
        .await
        .map_err(|error| AppError::Internal(format!("failed to decode jwks: {error}")))?;

    signing_key_from_jwks(&jwks)
}

/// Picks the first key with `use == "sig"`.
///
/// Modulus and exponent are accepted either as decimal integers or as
/// base64url-encoded big-endian bytes.
pub(super) fn signing_key_from_jwks(jwks: &JwkSet) -> AppResult<DecodingKey> {
    let key = jwks
        .keys
        .iter()
        .find(|key| key.key_use.as_deref() == Some("sig"))
        .ok_or_else(|| AppError::Internal("signing key not found in jwks".to_owned()))?;

    let (Some(modulus), Some(exponent)) = (key.n.as_deref(), key.e.as_deref()) else {
        return Err(AppError::Internal(
            "signing key is missing its modulus or exponent".to_owned(),
        ));
    };

    if is_decimal(modulus) && is_decimal(exponent) {
        let modulus = decimal_to_be_bytes(modulus);
        let exponent = decimal_to_be_bytes(exponent);
        return Ok(DecodingKey::from_rsa_raw_components(&modulus, &exponent));
    }

    DecodingKey::from_rsa_components(modulus, exponent)
        .map_err(|error| AppError::Internal(format!("invalid signing key components: {error}")))
}

fn is_decimal(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Converts an unsigned decimal string to minimal big-endian bytes.
fn decimal_to_be_bytes(value: &str) -> Vec<u8> {
    // little-endian accumulator
    let mut bytes: Vec<u8> = Vec::new();

    for digit in value.bytes().map(|byte| u32::from(byte - b'0')) {
        let mut carry = digit;
        for byte in &mut bytes {
            let next = u32::from(*byte) * 10 + carry;
            *byte = (next & 0xff) as u8;
            carry = next >> 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    if bytes.is_empty() {
        bytes.push(0);
    }
    bytes.reverse();
    bytes
}
