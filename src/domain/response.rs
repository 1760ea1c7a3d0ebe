use crate::domain::value::SmsStatus;

/// Result of `POST /v0.1/messages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSubmissionResponse {
    pub message_uuid: String,
}

/// Result of `POST /sms/json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsSubmissionResponse {
    pub message_count: u32,
    pub messages: Vec<SmsMessageResult>,
}

impl SmsSubmissionResponse {
    /// First message part the API rejected, if any.
    pub fn first_failure(&self) -> Option<&SmsMessageResult> {
        self.messages.iter().find(|message| !message.status.is_ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessageResult {
    pub to: Option<String>,
    pub message_id: Option<String>,
    pub status: SmsStatus,
    pub error_text: Option<String>,
    pub remaining_balance: Option<String>,
    pub message_price: Option<String>,
    pub network: Option<String>,
}

/// Result of `GET /account/get-balance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceResponse {
    /// Balance in EUR, as the exact decimal text the server sent.
    pub value: String,
    pub auto_reload: bool,
}
