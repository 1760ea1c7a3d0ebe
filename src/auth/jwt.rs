//! Application (JWT) authentication.
//!
//! A fresh RS256 token is minted for every decorated request and sent as
//! `Authorization: Bearer <token>`.

use std::fmt;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SigningError;
use super::registry::CredentialError;
use crate::client::ApiRequest;

/// Lifetime of a minted token, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 15 * 60;

/// Claims carried by application tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub application_id: String,
    /// Issued at (seconds since epoch).
    pub iat: i64,
    /// Expiration time (seconds since epoch).
    pub exp: i64,
    /// Unique token id.
    pub jti: String,
}

impl JwtClaims {
    /// Claims for a token issued at `issued_at` with a random `jti`.
    pub fn new(application_id: impl Into<String>, issued_at: i64) -> Self {
        Self {
            application_id: application_id.into(),
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Sign `claims` with `key`. Pure apart from the RSA signature itself.
pub fn mint_token(key: &EncodingKey, claims: &JwtClaims) -> Result<String, SigningError> {
    let header = Header::new(Algorithm::RS256);
    Ok(jsonwebtoken::encode(&header, claims, key)?)
}

/// Authenticates as an application using its id and RSA private key.
#[derive(Clone)]
pub struct JwtAuth {
    application_id: String,
    key: EncodingKey,
}

impl JwtAuth {
    /// Parse `private_key` (PEM, PKCS#1 or PKCS#8) into a signing key.
    pub(crate) fn new(application_id: String, private_key: &[u8]) -> Result<Self, CredentialError> {
        let key = EncodingKey::from_rsa_pem(private_key).map_err(CredentialError::KeyParse)?;
        Ok(Self {
            application_id,
            key,
        })
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Mint a token issued at the request timestamp and attach it as a bearer credential.
    pub fn decorate(&self, mut request: ApiRequest) -> Result<ApiRequest, SigningError> {
        let claims = JwtClaims::new(self.application_id.clone(), request.timestamp);
        let token = mint_token(&self.key, &claims)?;
        request
            .headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
        request
            .headers
            .push(("Authorization".to_owned(), format!("Bearer {token}")));
        Ok(request)
    }
}

impl fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtAuth")
            .field("application_id", &self.application_id)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{DecodingKey, Validation};

    use super::*;
    use crate::client::HttpMethod;

    const PRIVATE_KEY: &str = include_str!("../../tests/fixtures/private.pem");
    const PUBLIC_KEY: &str = include_str!("../../tests/fixtures/public.pem");

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn decode(token: &str) -> JwtClaims {
        let key = DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap();
        jsonwebtoken::decode::<JwtClaims>(token, &key, &Validation::new(Algorithm::RS256))
            .unwrap()
            .claims
    }

    fn bearer(request: &ApiRequest) -> &str {
        request
            .header("Authorization")
            .and_then(|value| value.strip_prefix("Bearer "))
            .unwrap()
    }

    #[test]
    fn rejects_unparsable_key() {
        let err = JwtAuth::new("app".to_owned(), b"not a pem key").unwrap_err();
        assert!(matches!(err, CredentialError::KeyParse(_)));
    }

    #[test]
    fn decorate_attaches_verifiable_bearer_token() {
        let auth = JwtAuth::new("app-123".to_owned(), PRIVATE_KEY.as_bytes()).unwrap();
        let issued_at = now();
        let request = ApiRequest::new(HttpMethod::Post, "https://example.invalid", issued_at);

        let decorated = auth.decorate(request).unwrap();
        let claims = decode(bearer(&decorated));

        assert_eq!(claims.application_id, "app-123");
        assert_eq!(claims.iat, issued_at);
        assert_eq!(claims.exp, issued_at + TOKEN_LIFETIME_SECS);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
        assert!(decorated.params.is_empty());
    }

    #[test]
    fn each_decoration_mints_a_fresh_token() {
        let auth = JwtAuth::new("app-123".to_owned(), PRIVATE_KEY.as_bytes()).unwrap();
        let request = ApiRequest::new(HttpMethod::Post, "https://example.invalid", now());

        let first = auth.decorate(request.clone()).unwrap();
        let second = auth.decorate(request).unwrap();

        let first = decode(bearer(&first));
        let second = decode(bearer(&second));
        assert_ne!(first.jti, second.jti);
        assert_eq!(first.iat, second.iat);
    }

    #[test]
    fn redecorating_keeps_a_single_authorization_header() {
        let auth = JwtAuth::new("app".to_owned(), PRIVATE_KEY.as_bytes()).unwrap();
        let request = ApiRequest::new(HttpMethod::Post, "https://example.invalid", now());
        let twice = auth.decorate(auth.decorate(request).unwrap()).unwrap();
        let count = twice
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn debug_redacts_key() {
        let auth = JwtAuth::new("app".to_owned(), PRIVATE_KEY.as_bytes()).unwrap();
        let debug = format!("{auth:?}");
        assert!(debug.contains("app"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("BEGIN"));
    }
}
