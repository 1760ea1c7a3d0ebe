//! Credential validation and the resulting strategy registry.

use std::path::PathBuf;

use secrecy::ExposeSecret;

use super::credentials::CredentialSet;
use super::jwt::JwtAuth;
use super::signature::SignatureAuth;
use super::token::TokenAuth;
use super::{AuthKind, AuthStrategy};

/// The supplied credentials cannot be turned into authentication strategies.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("API key required with API secret")]
    ApiSecretWithoutKey,

    #[error("API key required with signature secret")]
    SignatureSecretWithoutKey,

    #[error("secret or signature required with API key")]
    ApiKeyWithoutSecret,

    #[error("private key required with application id")]
    ApplicationIdWithoutPrivateKey,

    #[error("application id required with private key")]
    PrivateKeyWithoutApplicationId,

    /// The private key bytes are not a PEM-encoded RSA private key.
    #[error("unable to parse private key: {0}")]
    KeyParse(#[source] jsonwebtoken::errors::Error),

    #[error("unable to read private key at {}", path.display())]
    PrivateKeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turn a [`CredentialSet`] into the strategies it supports.
///
/// Pairing rules are checked before any strategy is built, in a fixed order, and the first
/// violation is returned. An empty set yields an empty (unauthenticated) registry.
pub fn validate(credentials: CredentialSet) -> Result<AuthStrategyRegistry, CredentialError> {
    check_pairings(&credentials)?;

    let CredentialSet {
        api_key,
        api_secret,
        signature_secret,
        signature_method,
        application_id,
        private_key,
    } = credentials;

    let mut registry = AuthStrategyRegistry::default();

    if let (Some(key), Some(secret)) = (api_key.as_ref(), api_secret) {
        registry.insert(AuthStrategy::Token(TokenAuth::new(key.clone(), secret)));
    }
    if let (Some(key), Some(secret)) = (api_key, signature_secret) {
        registry.insert(AuthStrategy::Signature(SignatureAuth::new(
            key,
            secret,
            signature_method,
        )));
    }
    if let (Some(application_id), Some(private_key)) = (application_id, private_key) {
        let jwt = JwtAuth::new(application_id, private_key.expose_secret())?;
        registry.insert(AuthStrategy::Jwt(jwt));
    }

    Ok(registry)
}

fn check_pairings(credentials: &CredentialSet) -> Result<(), CredentialError> {
    let has_key = credentials.api_key.is_some();
    let has_secret = credentials.api_secret.is_some();
    let has_signature = credentials.signature_secret.is_some();
    let has_application_id = credentials.application_id.is_some();
    let has_private_key = credentials.private_key.is_some();

    if has_secret && !has_key {
        return Err(CredentialError::ApiSecretWithoutKey);
    }
    if has_signature && !has_key {
        return Err(CredentialError::SignatureSecretWithoutKey);
    }
    if has_key && !has_secret && !has_signature {
        return Err(CredentialError::ApiKeyWithoutSecret);
    }
    if has_application_id && !has_private_key {
        return Err(CredentialError::ApplicationIdWithoutPrivateKey);
    }
    if has_private_key && !has_application_id {
        return Err(CredentialError::PrivateKeyWithoutApplicationId);
    }
    Ok(())
}

/// Ordered set of usable strategies, at most one per [`AuthKind`].
///
/// Read-only once built; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AuthStrategyRegistry {
    strategies: Vec<AuthStrategy>,
}

impl AuthStrategyRegistry {
    /// Keeps the first strategy of each kind.
    fn insert(&mut self, strategy: AuthStrategy) {
        if !self.contains(strategy.kind()) {
            self.strategies.push(strategy);
        }
    }

    /// First strategy, in registry order, whose kind is in `accepted`.
    pub fn select(&self, accepted: &[AuthKind]) -> Option<&AuthStrategy> {
        self.strategies
            .iter()
            .find(|strategy| accepted.contains(&strategy.kind()))
    }

    pub fn contains(&self, kind: AuthKind) -> bool {
        self.strategies.iter().any(|strategy| strategy.kind() == kind)
    }

    pub fn kinds(&self) -> Vec<AuthKind> {
        self.strategies.iter().map(AuthStrategy::kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuthStrategy> {
        self.strategies.iter()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// `true` for an unauthenticated client.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiRequest, HttpMethod};

    const PRIVATE_KEY: &str = include_str!("../../tests/fixtures/private.pem");

    fn full_set() -> CredentialSet {
        CredentialSet::builder()
            .api_key("K")
            .api_secret("S")
            .signature_secret("SIG")
            .application_id("A")
            .private_key(PRIVATE_KEY)
            .build()
    }

    fn err(set: CredentialSet) -> CredentialError {
        validate(set).unwrap_err()
    }

    #[test]
    fn api_secret_requires_api_key() {
        let set = CredentialSet::builder().api_secret("S").build();
        let err = err(set);
        assert!(matches!(err, CredentialError::ApiSecretWithoutKey));
        assert_eq!(err.to_string(), "API key required with API secret");
    }

    #[test]
    fn signature_secret_requires_api_key() {
        let set = CredentialSet::builder().signature_secret("SIG").build();
        let err = err(set);
        assert!(matches!(err, CredentialError::SignatureSecretWithoutKey));
        assert_eq!(err.to_string(), "API key required with signature secret");
    }

    #[test]
    fn api_key_requires_a_secret() {
        let set = CredentialSet::builder().api_key("K").build();
        let err = err(set);
        assert!(matches!(err, CredentialError::ApiKeyWithoutSecret));
        assert_eq!(err.to_string(), "secret or signature required with API key");
    }

    #[test]
    fn application_id_requires_private_key() {
        let set = CredentialSet::builder().application_id("A").build();
        let err = err(set);
        assert!(matches!(err, CredentialError::ApplicationIdWithoutPrivateKey));
        assert_eq!(err.to_string(), "private key required with application id");
    }

    #[test]
    fn private_key_requires_application_id() {
        let set = CredentialSet::builder().private_key(PRIVATE_KEY).build();
        let err = err(set);
        assert!(matches!(err, CredentialError::PrivateKeyWithoutApplicationId));
        assert_eq!(err.to_string(), "application id required with private key");
    }

    #[test]
    fn first_violated_rule_wins() {
        let set = CredentialSet::builder()
            .api_secret("S")
            .signature_secret("SIG")
            .application_id("A")
            .build();
        assert!(matches!(err(set), CredentialError::ApiSecretWithoutKey));

        let set = CredentialSet::builder()
            .signature_secret("SIG")
            .private_key(PRIVATE_KEY)
            .build();
        assert!(matches!(err(set), CredentialError::SignatureSecretWithoutKey));
    }

    #[test]
    fn pairing_errors_take_precedence_over_key_parsing() {
        let set = CredentialSet::builder()
            .api_key("K")
            .application_id("A")
            .private_key("garbage")
            .build();
        assert!(matches!(err(set), CredentialError::ApiKeyWithoutSecret));
    }

    #[test]
    fn key_and_secret_yield_only_token_auth() {
        let registry = validate(CredentialSet::builder().api_key("K").api_secret("S").build())
            .unwrap();
        assert_eq!(registry.kinds(), vec![AuthKind::Token]);
    }

    #[test]
    fn key_and_signature_yield_only_signature_auth() {
        let registry = validate(
            CredentialSet::builder()
                .api_key("K")
                .signature_secret("SIG")
                .build(),
        )
        .unwrap();
        assert_eq!(registry.kinds(), vec![AuthKind::Signature]);
    }

    #[test]
    fn full_set_yields_three_decoratable_strategies() {
        let registry = validate(full_set()).unwrap();
        assert_eq!(
            registry.kinds(),
            vec![AuthKind::Token, AuthKind::Signature, AuthKind::Jwt]
        );

        let now = chrono::Utc::now().timestamp();
        for strategy in registry.iter() {
            let request = ApiRequest::new(HttpMethod::Get, "https://example.invalid", now);
            let decorated = strategy.decorate(request.clone()).unwrap();
            assert_ne!(decorated, request, "{:?} did not decorate", strategy.kind());
        }
    }

    #[test]
    fn unparsable_private_key_is_a_key_parse_error() {
        let set = CredentialSet::builder()
            .application_id("A")
            .private_key(b"\x00\x01 definitely not a key".to_vec())
            .build();
        assert!(matches!(err(set), CredentialError::KeyParse(_)));
    }

    #[test]
    fn empty_set_yields_empty_registry() {
        let registry = validate(CredentialSet::empty()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.select(&[AuthKind::Token]).is_none());
    }

    #[test]
    fn select_follows_registry_order_not_accepted_order() {
        let registry = validate(full_set()).unwrap();

        let picked = registry
            .select(&[AuthKind::Jwt, AuthKind::Signature])
            .unwrap();
        assert_eq!(picked.kind(), AuthKind::Signature);

        let picked = registry.select(&[AuthKind::Jwt]).unwrap();
        assert_eq!(picked.kind(), AuthKind::Jwt);

        let token_only = validate(CredentialSet::builder().api_key("K").api_secret("S").build())
            .unwrap();
        assert!(token_only.select(&[AuthKind::Jwt]).is_none());
    }
}
