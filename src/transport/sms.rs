use serde::Deserialize;

use super::amount::Amount;
use crate::domain::{
    ClientRef, MessageText, MessageType, RawPhoneNumber, SenderId, SmsMessageResult, SmsStatus,
    SmsSubmissionResponse, TextMessage,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid status code: {value}")]
    InvalidStatus { value: String },
}

#[derive(Debug, Clone, Deserialize)]
struct SmsJsonResponse {
    #[serde(rename = "message-count", default)]
    message_count: Option<TransportCount>,
    #[serde(default)]
    messages: Vec<SmsJsonMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct SmsJsonMessage {
    #[serde(default)]
    to: Option<String>,
    #[serde(rename = "message-id", default)]
    message_id: Option<String>,
    status: TransportCount,
    #[serde(rename = "error-text", default)]
    error_text: Option<String>,
    #[serde(rename = "remaining-balance", default)]
    remaining_balance: Option<Amount>,
    #[serde(rename = "message-price", default)]
    message_price: Option<Amount>,
    #[serde(default)]
    network: Option<String>,
}

/// Integer sent as either a JSON number or a numeric string (`"1"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportCount {
    Int(i64),
    String(String),
}

impl TransportCount {
    fn into_i64(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::String(value) => value.trim().parse::<i64>().ok(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::String(value) => value.clone(),
        }
    }
}

pub fn encode_sms_form(message: &TextMessage) -> Vec<(String, String)> {
    let mut params = vec![
        (SenderId::FIELD.to_owned(), message.from().as_str().to_owned()),
        (RawPhoneNumber::FIELD.to_owned(), message.to().msisdn().to_owned()),
        (MessageText::FIELD.to_owned(), message.text().as_str().to_owned()),
        (
            MessageType::FIELD.to_owned(),
            message.message_type().as_str().to_owned(),
        ),
    ];
    if let Some(client_ref) = message.client_ref() {
        params.push((ClientRef::FIELD.to_owned(), client_ref.as_str().to_owned()));
    }
    params
}

pub fn decode_sms_json_response(json: &str) -> Result<SmsSubmissionResponse, TransportError> {
    let parsed: SmsJsonResponse = serde_json::from_str(json)?;

    let messages = parsed
        .messages
        .into_iter()
        .map(|message| {
            let status = status_from(message.status)?;
            Ok(SmsMessageResult {
                to: message.to,
                message_id: message.message_id,
                status,
                error_text: message.error_text,
                remaining_balance: message.remaining_balance.map(Amount::into_string),
                message_price: message.message_price.map(Amount::into_string),
                network: message.network,
            })
        })
        .collect::<Result<Vec<_>, TransportError>>()?;

    let message_count = parsed
        .message_count
        .and_then(TransportCount::into_i64)
        .and_then(|count| u32::try_from(count).ok())
        .unwrap_or(messages.len() as u32);

    Ok(SmsSubmissionResponse {
        message_count,
        messages,
    })
}

fn status_from(raw: TransportCount) -> Result<SmsStatus, TransportError> {
    let value = raw.describe();
    raw.into_i64()
        .and_then(|code| i32::try_from(code).ok())
        .map(SmsStatus::new)
        .ok_or(TransportError::InvalidStatus { value })
}
