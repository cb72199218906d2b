use chrono::{Duration, Utc};
use common::{AggregatorError, Result};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::credentials::ServiceAccountKey;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Drive access is needed to look spreadsheets up by name.
pub const SCOPES: &[&str] = &[SPREADSHEETS_SCOPE, DRIVE_SCOPE];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    sub: String,
    scope: String,
    aud: String,
    exp: i64,
    iat: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

fn sign_assertion(key: &ServiceAccountKey, scopes: &[&str]) -> Result<String> {
    let now = Utc::now();
    let claims = JwtClaims {
        iss: key.client_email.clone(),
        sub: key.client_email.clone(),
        scope: scopes.join(" "),
        aud: key.token_uri.clone(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| AggregatorError::sheet(format!("Failed to parse private key: {e}")))?;

    encode(&header, &claims, &encoding_key)
        .map_err(|e| AggregatorError::sheet(format!("Failed to encode JWT: {e}")))
}

/// Exchanges a signed service-account assertion for a bearer token.
pub async fn fetch_access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
    scopes: &[&str],
) -> Result<String> {
    let assertion = sign_assertion(key, scopes)?;
    debug!(scopes = %scopes.join(" "), "Service account credentials created");

    let params = [
        ("grant_type", JWT_BEARER_GRANT),
        ("assertion", assertion.as_str()),
    ];

    let response = http
        .post(&key.token_uri)
        .form(&params)
        .send()
        .await
        .map_err(|e| AggregatorError::sheet(format!("Failed to get access token: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AggregatorError::sheet(format!(
            "Token request failed with status {status}: {body}"
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AggregatorError::sheet(format!("Failed to parse token response: {e}")))?;

    Ok(token.access_token)
}
