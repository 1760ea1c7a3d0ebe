//! Transport layer: wire-format details (serialization/deserialization).

mod account;
mod amount;
mod messages;
mod sms;

pub use account::decode_balance_json_response;
pub use messages::{decode_message_json_response, encode_message_json};
pub use sms::{decode_sms_json_response, encode_sms_form};
