//! Client layer: orchestrates auth selection, transport calls, and response decoding.

mod executor;
#[cfg(test)]
mod fake;
mod http;

use std::sync::Arc;
use std::time::Duration;

pub use executor::RequestExecutor;
pub use self::http::{ApiRequest, BoxError, BoxFuture, HttpMethod, HttpResponse, HttpTransport};

use crate::auth::{AuthKind, AuthStrategyRegistry, CredentialError, CredentialSet, SigningError};
use crate::domain::{
    BalanceResponse, MessageSubmissionResponse, SmsStatus, SmsSubmissionResponse, TextMessage,
    ValidationError,
};
use crate::operation::{ApiHost, ApiOperation, GetBalance, SendMessage, SendSms};
use self::http::ReqwestTransport;

pub const DEFAULT_API_BASE_URI: &str = "https://api.nexmo.com";
pub const DEFAULT_REST_BASE_URI: &str = "https://rest.nexmo.com";

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`NexmoClient`] and [`RequestExecutor`].
///
/// None of these are retried by the crate; retry policy belongs to the caller.
pub enum NexmoError {
    /// The credential set is incoherent or the private key is unusable.
    #[error("invalid credentials: {0}")]
    Credentials(#[from] CredentialError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No registered strategy is accepted by the operation. The request was not sent.
    #[error("no usable auth method for {operation}; it accepts {accepted:?}")]
    AuthMethodUnavailable {
        operation: &'static str,
        accepted: &'static [AuthKind],
    },

    /// The selected strategy failed to sign the request.
    #[error("signing error: {0}")]
    Signing(#[from] SigningError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be decoded; `body` is the raw payload.
    #[error("decode error: {source}")]
    Decode {
        #[source]
        source: BoxError,
        body: String,
    },

    /// The SMS API accepted the request but rejected the message.
    #[error("API error: status {} {error_text:?}", .status.as_i32())]
    Api {
        status: SmsStatus,
        error_text: Option<String>,
    },
}

/// Base URIs the operations are sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub api_base_uri: String,
    pub rest_base_uri: String,
}

impl HttpConfig {
    pub fn base_uri(&self, host: ApiHost) -> &str {
        match host {
            ApiHost::Api => &self.api_base_uri,
            ApiHost::Rest => &self.rest_base_uri,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_base_uri: DEFAULT_API_BASE_URI.to_owned(),
            rest_base_uri: DEFAULT_REST_BASE_URI.to_owned(),
        }
    }
}

/// Builder for [`NexmoClient`].
///
/// Use this when you need to customize base URIs, timeout, user-agent, or the transport.
pub struct NexmoClientBuilder {
    credentials: CredentialSet,
    config: HttpConfig,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl NexmoClientBuilder {
    /// Create a builder with the default base URIs and no timeout/user-agent override.
    pub fn new(credentials: CredentialSet) -> Self {
        Self {
            credentials,
            config: HttpConfig::default(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Override both base URIs at once (useful against a mock server).
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        self.config.api_base_uri = uri.clone();
        self.config.rest_base_uri = uri;
        self
    }

    /// Override the base URI of the Messages API (`api.nexmo.com`).
    pub fn api_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.api_base_uri = uri.into();
        self
    }

    /// Override the base URI of the SMS and account APIs (`rest.nexmo.com`).
    pub fn rest_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.rest_base_uri = uri.into();
        self
    }

    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.config = config;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a custom transport. `timeout` and `user_agent` are then ignored.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the credentials and build a [`NexmoClient`].
    pub fn build(self) -> Result<NexmoClient, NexmoError> {
        let auth = crate::auth::validate(self.credentials)?;

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| NexmoError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(NexmoClient {
            executor: RequestExecutor::new(self.config, http),
            auth: Arc::new(auth),
        })
    }
}

#[derive(Clone)]
/// High-level Nexmo client.
///
/// Credentials are validated once when the client is built; the resulting registry is shared
/// read-only between clones and concurrent calls. By default it uses:
/// - `https://api.nexmo.com` for the Messages API
/// - `https://rest.nexmo.com` for the SMS and account APIs
pub struct NexmoClient {
    executor: RequestExecutor,
    auth: Arc<AuthStrategyRegistry>,
}

impl NexmoClient {
    /// Create a client using the default base URIs.
    ///
    /// For more customization, use [`NexmoClient::builder`].
    pub fn new(credentials: CredentialSet) -> Result<Self, NexmoError> {
        Self::builder(credentials).build()
    }

    /// Create a client from the `NEXMO_*` environment variables.
    pub fn from_env() -> Result<Self, NexmoError> {
        Self::new(CredentialSet::from_env()?)
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: CredentialSet) -> NexmoClientBuilder {
        NexmoClientBuilder::new(credentials)
    }

    /// Strategies available to this client.
    pub fn auth(&self) -> &AuthStrategyRegistry {
        &self.auth
    }

    pub fn http_config(&self) -> &HttpConfig {
        self.executor.config()
    }

    /// Run any operation, including ones defined outside this crate.
    pub async fn execute<O: ApiOperation>(
        &self,
        operation: &O,
        payload: &O::Payload,
    ) -> Result<O::Output, NexmoError> {
        self.executor.execute(operation, &self.auth, payload).await
    }

    /// Send a text message through the Messages API.
    ///
    /// Requires application credentials (application id + private key).
    pub async fn submit_message(
        &self,
        message: &TextMessage,
    ) -> Result<MessageSubmissionResponse, NexmoError> {
        self.execute(&SendMessage, message).await
    }

    /// Send an SMS through the SMS API.
    ///
    /// Uses the API secret when available, otherwise a signed request.
    ///
    /// Errors:
    /// - [`NexmoError::Api`] for the first message part the API rejected.
    pub async fn send_sms(&self, message: &TextMessage) -> Result<SmsSubmissionResponse, NexmoError> {
        let response = self.execute(&SendSms, message).await?;
        if let Some(failure) = response.first_failure() {
            return Err(NexmoError::Api {
                status: failure.status,
                error_text: failure.error_text.clone(),
            });
        }
        Ok(response)
    }

    /// Fetch the account balance. Requires an API key and secret.
    pub async fn get_balance(&self) -> Result<BalanceResponse, NexmoError> {
        self.execute(&GetBalance, &()).await
    }
}
