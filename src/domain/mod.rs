//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{MessageType, TextMessage};
pub use response::{
    BalanceResponse, MessageSubmissionResponse, SmsMessageResult, SmsSubmissionResponse,
};
pub use validation::ValidationError;
pub use value::{
    ClientRef, KnownSmsStatus, MessageText, PhoneNumber, RawPhoneNumber, SenderId, SmsStatus,
};
