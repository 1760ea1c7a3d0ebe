//! Raw credential material supplied by the caller.

use std::path::{Path, PathBuf};

use secrecy::{SecretSlice, SecretString};

use super::registry::CredentialError;
use super::signature::SignatureMethod;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "NEXMO_API_KEY";
/// Environment variable holding the API secret.
pub const ENV_API_SECRET: &str = "NEXMO_API_SECRET";
/// Environment variable holding the signature secret.
pub const ENV_SIGNATURE_SECRET: &str = "NEXMO_SIGNATURE_SECRET";
/// Environment variable holding the application id.
pub const ENV_APPLICATION_ID: &str = "NEXMO_APP_ID";
/// Environment variable holding the *path* of the application's private key.
pub const ENV_PRIVATE_KEY_PATH: &str = "NEXMO_PRIVATE_KEY";

/// Whatever subset of credentials the caller has.
///
/// A `CredentialSet` is not checked for coherence until it is passed to
/// [`validate`](super::validate), which consumes it. Secrets are redacted from `Debug`.
#[derive(Debug, Default)]
pub struct CredentialSet {
    pub(crate) api_key: Option<String>,
    pub(crate) api_secret: Option<SecretString>,
    pub(crate) signature_secret: Option<SecretString>,
    pub(crate) signature_method: SignatureMethod,
    pub(crate) application_id: Option<String>,
    pub(crate) private_key: Option<SecretSlice<u8>>,
}

impl CredentialSet {
    /// A set with no credentials at all; validates to an unauthenticated registry.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> CredentialSetBuilder {
        CredentialSetBuilder::default()
    }

    /// Read credentials from the `NEXMO_*` environment variables.
    ///
    /// Unset or blank variables are treated as absent. `NEXMO_PRIVATE_KEY` is a file path;
    /// failing to read it is reported as [`CredentialError::PrivateKeyRead`].
    pub fn from_env() -> Result<Self, CredentialError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CredentialError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(api_key) = read(ENV_API_KEY) {
            builder = builder.api_key(api_key);
        }
        if let Some(api_secret) = read(ENV_API_SECRET) {
            builder = builder.api_secret(api_secret);
        }
        if let Some(signature_secret) = read(ENV_SIGNATURE_SECRET) {
            builder = builder.signature_secret(signature_secret);
        }
        if let Some(application_id) = read(ENV_APPLICATION_ID) {
            builder = builder.application_id(application_id);
        }
        if let Some(path) = read(ENV_PRIVATE_KEY_PATH) {
            builder = builder.private_key_path(path)?;
        }
        Ok(builder.build())
    }
}

/// Collects credential fields one at a time.
#[derive(Debug, Default)]
pub struct CredentialSetBuilder {
    inner: CredentialSet,
}

impl CredentialSetBuilder {
    /// The API key found in the dashboard; pair it with an API secret and/or signature secret.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.inner.api_key = Some(api_key.into());
        self
    }

    pub fn api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.inner.api_secret = Some(SecretString::from(api_secret.into()));
        self
    }

    pub fn signature_secret(mut self, signature_secret: impl Into<String>) -> Self {
        self.inner.signature_secret = Some(SecretString::from(signature_secret.into()));
        self
    }

    /// Digest used for request signatures. Defaults to [`SignatureMethod::HmacSha256`].
    pub fn signature_method(mut self, method: SignatureMethod) -> Self {
        self.inner.signature_method = method;
        self
    }

    /// Application id used as the JWT `application_id` claim; pair it with a private key.
    pub fn application_id(mut self, application_id: impl Into<String>) -> Self {
        self.inner.application_id = Some(application_id.into());
        self
    }

    /// PEM-encoded RSA private key of the application.
    pub fn private_key(mut self, contents: impl Into<Vec<u8>>) -> Self {
        self.inner.private_key = Some(SecretSlice::from(contents.into()));
        self
    }

    /// Load the private key from a file.
    pub fn private_key_path(self, path: impl AsRef<Path>) -> Result<Self, CredentialError> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|source| CredentialError::PrivateKeyRead {
            path: PathBuf::from(path),
            source,
        })?;
        Ok(self.private_key(contents))
    }

    pub fn build(self) -> CredentialSet {
        self.inner
    }
}
