//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide shared secret. Issued
//! claims carry no expiry, so a token stays valid until the secret is rotated;
//! that rotation is the only revocation mechanism. Credential and signature
//! checks are not constant-time.

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub valid_user: bool,
}

/// Signing and verification material derived once from the shared secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Issued claims have no exp; accept them as-is.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign claims into a compact JWT.
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding)
    }

    /// Verify a token's signature and return its claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

/// Validate a credential pair and mint a token for it.
///
/// Both fields must match the configured values exactly.
pub fn issue_token(
    config: &ServerConfig,
    keys: &TokenKeys,
    username: &str,
    password: &str,
) -> ApiResult<String> {
    if username != config.auth_username || password != config.auth_password {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let claims = TokenClaims { valid_user: true };
    let token = keys.sign(&claims).map_err(anyhow::Error::new)?;
    Ok(token)
}

/// Pull a token out of the `Authorization` header.
///
/// A `Bearer ` prefix is stripped when present; otherwise the header value is
/// used verbatim.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.strip_prefix("Bearer ").unwrap_or(s).to_string())
}

/// Guard for protected handlers.
///
/// Resolves the token from the explicit argument when supplied, falling back
/// to the `Authorization` header, then verifies its signature. Claim contents
/// are not inspected further.
pub fn require_token(
    keys: &TokenKeys,
    headers: &HeaderMap,
    explicit: Option<&str>,
) -> ApiResult<()> {
    let token = match explicit {
        Some(token) => token.to_string(),
        None => extract_bearer_token(headers)
            .ok_or_else(|| ApiError::unauthorized("No token provided"))?,
    };

    keys.verify(&token)
        .map_err(|_| ApiError::unauthorized("Token is wrong"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn test_config() -> ServerConfig {
        ServerConfig {
            auth_username: "goodUser".to_string(),
            auth_password: "goodPass".to_string(),
            token_secret: "unit-test-secret".to_string(),
            ..ServerConfig::default()
        }
    }

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn message_of(err: ApiError) -> String {
        match err {
            ApiError::User { message, .. } => message,
            ApiError::Internal(err) => panic!("expected classified error, got {err}"),
        }
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let keys = TokenKeys::new("unit-test-secret");
        let token = keys.sign(&TokenClaims { valid_user: true }).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert!(claims.valid_user);
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let keys = TokenKeys::new("unit-test-secret");
        let other = TokenKeys::new("another-secret");
        let token = keys.sign(&TokenClaims { valid_user: true }).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let keys = TokenKeys::new("unit-test-secret");
        assert!(keys.verify("garbage").is_err());
        assert!(keys.verify("a.b.c").is_err());
    }

    #[test]
    fn test_issue_token_with_valid_credentials() {
        let config = test_config();
        let keys = TokenKeys::new(&config.token_secret);
        let token = issue_token(&config, &keys, "goodUser", "goodPass").unwrap();
        assert!(keys.verify(&token).unwrap().valid_user);
    }

    #[test]
    fn test_issue_token_with_wrong_password() {
        let config = test_config();
        let keys = TokenKeys::new(&config.token_secret);
        let err = issue_token(&config, &keys, "goodUser", "wrongPass").unwrap_err();
        assert_eq!(message_of(err), "Invalid username or password");
    }

    #[test]
    fn test_extract_bearer_token_strips_prefix() {
        let headers = headers_with_auth("Bearer my-secret-token");
        assert_eq!(
            extract_bearer_token(&headers),
            Some("my-secret-token".to_string())
        );
    }

    #[test]
    fn test_extract_bearer_token_without_prefix() {
        let headers = headers_with_auth("raw-token-value");
        assert_eq!(
            extract_bearer_token(&headers),
            Some("raw-token-value".to_string())
        );
    }

    #[test]
    fn test_extract_bearer_token_no_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_require_token_missing() {
        let keys = TokenKeys::new("unit-test-secret");
        let err = require_token(&keys, &HeaderMap::new(), None).unwrap_err();
        assert_eq!(message_of(err), "No token provided");
    }

    #[test]
    fn test_require_token_wrong_signature() {
        let keys = TokenKeys::new("unit-test-secret");
        let other = TokenKeys::new("another-secret");
        let token = other.sign(&TokenClaims { valid_user: true }).unwrap();

        let headers = headers_with_auth(&format!("Bearer {token}"));
        let err = require_token(&keys, &headers, None).unwrap_err();
        assert_eq!(message_of(err), "Token is wrong");
    }

    #[test]
    fn test_require_token_from_header() {
        let keys = TokenKeys::new("unit-test-secret");
        let token = keys.sign(&TokenClaims { valid_user: true }).unwrap();

        let headers = headers_with_auth(&format!("Bearer {token}"));
        assert!(require_token(&keys, &headers, None).is_ok());
    }

    #[test]
    fn test_require_token_explicit_wins_over_header() {
        let keys = TokenKeys::new("unit-test-secret");
        let token = keys.sign(&TokenClaims { valid_user: true }).unwrap();

        // Valid header, bad explicit argument: the explicit one is used.
        let headers = headers_with_auth(&format!("Bearer {token}"));
        let err = require_token(&keys, &headers, Some("garbage")).unwrap_err();
        assert_eq!(message_of(err), "Token is wrong");

        // Explicit valid token works without any header.
        assert!(require_token(&keys, &HeaderMap::new(), Some(&token)).is_ok());
    }
}
