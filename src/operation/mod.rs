//! Per-endpoint descriptors: where a request goes, which auth it accepts, and how its
//! payload and response are encoded.

use std::error::Error as StdError;

use crate::auth::AuthKind;
use crate::client::{BoxError, HttpMethod};
use crate::domain::{
    BalanceResponse, MessageSubmissionResponse, SmsSubmissionResponse, TextMessage,
};

/// Which configured base URI an operation is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiHost {
    /// `https://api.nexmo.com` by default.
    Api,
    /// `https://rest.nexmo.com` by default.
    Rest,
}

/// Encoded request payload, before authentication is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    pub params: Vec<(String, String)>,
    pub json: Option<serde_json::Value>,
}

impl RequestBody {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn form(params: Vec<(String, String)>) -> Self {
        Self { params, json: None }
    }

    pub fn json(json: serde_json::Value) -> Self {
        Self {
            params: Vec::new(),
            json: Some(json),
        }
    }
}

/// One remote action.
///
/// `ACCEPTED_AUTH` is fixed per operation and must not be empty (the executor asserts this in
/// debug builds); the executor picks the first registry strategy whose kind appears in it.
pub trait ApiOperation: Send + Sync {
    type Payload: Sync;
    type Output;

    /// Short name used in errors and logs.
    const NAME: &'static str;
    const METHOD: HttpMethod;
    const HOST: ApiHost;
    const PATH: &'static str;
    const ACCEPTED_AUTH: &'static [AuthKind];
    /// Whether the request may be sent undecorated when no accepted strategy is registered.
    const ALLOWS_ANONYMOUS: bool = false;

    fn encode(&self, payload: &Self::Payload) -> RequestBody;

    fn decode(&self, payload: &Self::Payload, body: &str) -> Result<Self::Output, BoxError>;
}

fn boxed<E: StdError + Send + Sync + 'static>(err: E) -> BoxError {
    Box::new(err)
}

/// `POST /v0.1/messages` on the Messages API. Application (JWT) auth only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendMessage;

impl ApiOperation for SendMessage {
    type Payload = TextMessage;
    type Output = MessageSubmissionResponse;

    const NAME: &'static str = "send_message";
    const METHOD: HttpMethod = HttpMethod::Post;
    const HOST: ApiHost = ApiHost::Api;
    const PATH: &'static str = "/v0.1/messages";
    const ACCEPTED_AUTH: &'static [AuthKind] = &[AuthKind::Jwt];

    fn encode(&self, payload: &TextMessage) -> RequestBody {
        RequestBody::json(crate::transport::encode_message_json(payload))
    }

    fn decode(&self, _: &TextMessage, body: &str) -> Result<MessageSubmissionResponse, BoxError> {
        crate::transport::decode_message_json_response(body).map_err(boxed)
    }
}

/// `POST /sms/json` on the SMS API. Key/secret or signed requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendSms;

impl ApiOperation for SendSms {
    type Payload = TextMessage;
    type Output = SmsSubmissionResponse;

    const NAME: &'static str = "send_sms";
    const METHOD: HttpMethod = HttpMethod::Post;
    const HOST: ApiHost = ApiHost::Rest;
    const PATH: &'static str = "/sms/json";
    const ACCEPTED_AUTH: &'static [AuthKind] = &[AuthKind::Token, AuthKind::Signature];

    fn encode(&self, payload: &TextMessage) -> RequestBody {
        RequestBody::form(crate::transport::encode_sms_form(payload))
    }

    fn decode(&self, _: &TextMessage, body: &str) -> Result<SmsSubmissionResponse, BoxError> {
        crate::transport::decode_sms_json_response(body).map_err(boxed)
    }
}

/// `GET /account/get-balance`. Key/secret only.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetBalance;

impl ApiOperation for GetBalance {
    type Payload = ();
    type Output = BalanceResponse;

    const NAME: &'static str = "get_balance";
    const METHOD: HttpMethod = HttpMethod::Get;
    const HOST: ApiHost = ApiHost::Rest;
    const PATH: &'static str = "/account/get-balance";
    const ACCEPTED_AUTH: &'static [AuthKind] = &[AuthKind::Token];

    fn encode(&self, _: &()) -> RequestBody {
        RequestBody::empty()
    }

    fn decode(&self, _: &(), body: &str) -> Result<BalanceResponse, BoxError> {
        crate::transport::decode_balance_json_response(body).map_err(boxed)
    }
}
