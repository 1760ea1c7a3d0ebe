use crate::domain::value::{ClientRef, MessageText, RawPhoneNumber, SenderId};

/// How the SMS API should encode the message body (`type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Text,
    Unicode,
}

impl MessageType {
    pub const FIELD: &'static str = "type";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Unicode => "unicode",
        }
    }
}

/// A single text message from one sender to one recipient.
///
/// Used by both the Messages API (`submit_message`) and the SMS API (`send_sms`).
#[derive(Debug, Clone)]
pub struct TextMessage {
    from: SenderId,
    to: RawPhoneNumber,
    text: MessageText,
    client_ref: Option<ClientRef>,
}

impl TextMessage {
    pub fn new(from: SenderId, to: RawPhoneNumber, text: MessageText) -> Self {
        Self {
            from,
            to,
            text,
            client_ref: None,
        }
    }

    /// Attach a caller reference (SMS API only).
    pub fn with_client_ref(mut self, client_ref: ClientRef) -> Self {
        self.client_ref = Some(client_ref);
        self
    }

    pub fn from(&self) -> &SenderId {
        &self.from
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn client_ref(&self) -> Option<&ClientRef> {
        self.client_ref.as_ref()
    }

    /// [`MessageType::Unicode`] when the text contains any non-ASCII character.
    pub fn message_type(&self) -> MessageType {
        if self.text.is_ascii() {
            MessageType::Text
        } else {
            MessageType::Unicode
        }
    }
}
