use std::sync::Arc;

use super::http::{ApiRequest, HttpTransport};
use super::{HttpConfig, NexmoError};
use crate::auth::{AuthStrategy, AuthStrategyRegistry};
use crate::operation::ApiOperation;

/// Runs one [`ApiOperation`] against a registry: select, build, decorate, send, decode.
///
/// Holds no per-call state; strategy selection is redone on every call.
#[derive(Clone)]
pub struct RequestExecutor {
    config: HttpConfig,
    http: Arc<dyn HttpTransport>,
}

impl RequestExecutor {
    pub fn new(config: HttpConfig, http: Arc<dyn HttpTransport>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Execute `operation` with `payload`.
    ///
    /// Errors:
    /// - [`NexmoError::AuthMethodUnavailable`] when no registered strategy is accepted
    ///   (the transport is not called),
    /// - [`NexmoError::Transport`] for connection-level failures (not retried),
    /// - [`NexmoError::HttpStatus`] for non-2xx responses,
    /// - [`NexmoError::Decode`] when the body does not match the operation's format.
    pub async fn execute<O: ApiOperation>(
        &self,
        operation: &O,
        registry: &AuthStrategyRegistry,
        payload: &O::Payload,
    ) -> Result<O::Output, NexmoError> {
        debug_assert!(
            !O::ACCEPTED_AUTH.is_empty(),
            "operation {} declares no accepted auth kinds",
            O::NAME
        );
        let strategy = registry.select(O::ACCEPTED_AUTH);
        if strategy.is_none() && !O::ALLOWS_ANONYMOUS {
            tracing::debug!(
                operation = O::NAME,
                registered = ?registry.kinds(),
                "no accepted auth method registered"
            );
            return Err(NexmoError::AuthMethodUnavailable {
                operation: O::NAME,
                accepted: O::ACCEPTED_AUTH,
            });
        }

        let request = self.build_request(operation, payload, chrono::Utc::now().timestamp());
        let request = match strategy {
            Some(strategy) => strategy.decorate(request)?,
            None => request,
        };

        tracing::debug!(
            operation = O::NAME,
            method = %O::METHOD,
            auth = ?strategy.map(AuthStrategy::kind),
            "sending request"
        );
        let response = self
            .http
            .send(request)
            .await
            .map_err(NexmoError::Transport)?;
        tracing::debug!(
            operation = O::NAME,
            status = response.status,
            "received response"
        );

        if !response.is_success() {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(NexmoError::HttpStatus {
                status: response.status,
                body,
            });
        }

        match operation.decode(payload, &response.body) {
            Ok(output) => Ok(output),
            Err(source) => Err(NexmoError::Decode {
                source,
                body: response.body,
            }),
        }
    }

    fn build_request<O: ApiOperation>(
        &self,
        operation: &O,
        payload: &O::Payload,
        timestamp: i64,
    ) -> ApiRequest {
        let url = format!(
            "{}{}",
            self.config.base_uri(O::HOST).trim_end_matches('/'),
            O::PATH
        );
        let body = operation.encode(payload);

        let mut request = ApiRequest::new(O::METHOD, url, timestamp);
        request.params = body.params;
        request.json = body.json;
        request
    }
}
