//! Authentication: credential validation and request decoration.
//!
//! This module provides:
//! - [`CredentialSet`], the raw material a caller supplies (secrets redacted from `Debug`)
//! - [`validate`], which turns it into an [`AuthStrategyRegistry`]
//! - the three strategies: [`TokenAuth`], [`SignatureAuth`] and [`JwtAuth`]

mod credentials;
mod jwt;
mod registry;
mod signature;
mod token;

use std::fmt;

pub use credentials::{
    CredentialSet, CredentialSetBuilder, ENV_API_KEY, ENV_API_SECRET, ENV_APPLICATION_ID,
    ENV_PRIVATE_KEY_PATH, ENV_SIGNATURE_SECRET,
};
pub use jwt::{JwtAuth, JwtClaims, TOKEN_LIFETIME_SECS, mint_token};
pub use registry::{AuthStrategyRegistry, CredentialError, validate};
pub use signature::{SignatureAuth, SignatureMethod, sign_params, sign_request};
pub use token::TokenAuth;

use crate::client::ApiRequest;

/// Tag identifying an [`AuthStrategy`] variant; operations declare which tags they accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthKind {
    Token,
    Signature,
    Jwt,
}

impl fmt::Display for AuthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Token => "token",
            Self::Signature => "signature",
            Self::Jwt => "jwt",
        })
    }
}

/// Decorating a request failed after a strategy was selected.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("unable to sign JWT: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("unable to key HMAC: {0}")]
    Hmac(String),
}

/// One way of proving identity on an outgoing request.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    Token(TokenAuth),
    Signature(SignatureAuth),
    Jwt(JwtAuth),
}

impl AuthStrategy {
    pub fn kind(&self) -> AuthKind {
        match self {
            Self::Token(_) => AuthKind::Token,
            Self::Signature(_) => AuthKind::Signature,
            Self::Jwt(_) => AuthKind::Jwt,
        }
    }

    /// Add authentication data to `request`; nothing else is touched.
    pub fn decorate(&self, request: ApiRequest) -> Result<ApiRequest, SigningError> {
        match self {
            Self::Token(auth) => Ok(auth.decorate(request)),
            Self::Signature(auth) => auth.decorate(request),
            Self::Jwt(auth) => auth.decorate(request),
        }
    }
}
