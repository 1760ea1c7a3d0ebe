//! Typed Rust client for the Nexmo messaging HTTP APIs.
//!
//! Credentials are validated once into a registry of authentication strategies (API
//! key/secret, signed requests, application JWT). Every operation declares which strategies it
//! accepts, and the client picks a permitted one for each call.
//!
//! ```rust,no_run
//! use nexmo::{CredentialSet, MessageText, NexmoClient, RawPhoneNumber, SenderId, TextMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nexmo::NexmoError> {
//!     let credentials = CredentialSet::builder()
//!         .api_key("...")
//!         .api_secret("...")
//!         .build();
//!     let client = NexmoClient::new(credentials)?;
//!     let message = TextMessage::new(
//!         SenderId::new("Acme")?,
//!         RawPhoneNumber::new("447700900000")?,
//!         MessageText::new("hello")?,
//!     );
//!     let _resp = client.send_sms(&message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod domain;
pub mod operation;
mod transport;

pub use auth::{
    AuthKind, AuthStrategy, AuthStrategyRegistry, CredentialError, CredentialSet, SignatureMethod,
    validate,
};
pub use client::{HttpConfig, NexmoClient, NexmoClientBuilder, NexmoError, RequestExecutor};
pub use domain::{
    BalanceResponse, ClientRef, MessageSubmissionResponse, MessageText, MessageType, PhoneNumber,
    RawPhoneNumber, SenderId, SmsStatus, SmsSubmissionResponse, TextMessage, ValidationError,
};
pub use operation::{ApiOperation, GetBalance, SendMessage, SendSms};
