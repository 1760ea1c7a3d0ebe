use serde::{Deserialize, Serialize};

use crate::domain::{MessageSubmissionResponse, TextMessage};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing message_uuid")]
    MissingMessageUuid,
}

#[derive(Debug, Serialize)]
struct MessageJsonRequest<'a> {
    from: Endpoint<'a>,
    to: Endpoint<'a>,
    message: Message<'a>,
}

#[derive(Debug, Serialize)]
struct Endpoint<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    number: &'a str,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    content: Content<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResponse {
    #[serde(default)]
    message_uuid: Option<String>,
}

pub fn encode_message_json(message: &TextMessage) -> serde_json::Value {
    let request = MessageJsonRequest {
        from: Endpoint {
            kind: "sms",
            number: message.from().as_str(),
        },
        to: Endpoint {
            kind: "sms",
            number: message.to().msisdn(),
        },
        message: Message {
            content: Content {
                kind: "text",
                text: message.text().as_str(),
            },
        },
    };
    serde_json::json!(request)
}

pub fn decode_message_json_response(
    json: &str,
) -> Result<MessageSubmissionResponse, TransportError> {
    let parsed: MessageJsonResponse = serde_json::from_str(json)?;
    let message_uuid = parsed
        .message_uuid
        .filter(|uuid| !uuid.trim().is_empty())
        .ok_or(TransportError::MissingMessageUuid)?;
    Ok(MessageSubmissionResponse { message_uuid })
}
