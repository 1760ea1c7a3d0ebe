use phonenumber::country;

use crate::domain::validation::ValidationError;

/// Trim `value` and reject it when nothing is left.
fn non_blank(value: String, field: &'static str) -> Result<String, ValidationError> {
    match value.trim() {
        "" => Err(ValidationError::Empty { field }),
        trimmed if trimmed.len() == value.len() => Ok(value),
        trimmed => Ok(trimmed.to_owned()),
    }
}

/// Who the message appears to come from (`from`): a number or an alphanumeric id enabled on
/// the account. Trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenderId(String);

impl SenderId {
    pub const FIELD: &'static str = "from";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value.into(), Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Message body (`text`).
///
/// Must contain something other than whitespace; surrounding whitespace is sent as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageText(String);

impl MessageText {
    pub const FIELD: &'static str = "text";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        non_blank(value.clone(), Self::FIELD)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the text can go out as a plain `text` SMS.
    pub fn is_ascii(&self) -> bool {
        self.0.is_ascii()
    }
}

/// Caller reference attached to an SMS (`client-ref`), echoed back in delivery receipts.
///
/// Trimmed, never empty, at most [`ClientRef::MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientRef(String);

impl ClientRef {
    pub const FIELD: &'static str = "client-ref";
    pub const MAX_LEN: usize = 40;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_blank(value.into(), Self::FIELD)?;
        match value.chars().count() {
            actual if actual > Self::MAX_LEN => Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_LEN,
                actual,
            }),
            _ => Ok(Self(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Recipient number (`to`) taken as typed, apart from trimming.
///
/// Parse through [`PhoneNumber`] first when the input may be in national format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    pub const FIELD: &'static str = "to";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value.into(), Self::FIELD).map(Self)
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// International format without the leading `+`, as both Nexmo APIs expect.
    pub fn msisdn(&self) -> &str {
        self.0.strip_prefix('+').unwrap_or(&self.0)
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

/// Phone number normalized to E.164 with the `phonenumber` crate.
///
/// Two numbers are equal when their E.164 forms are, whatever was typed.
#[derive(Debug, Clone)]
pub struct PhoneNumber {
    raw: String,
    e164: String,
    country: Option<country::Id>,
}

impl PhoneNumber {
    /// Parse `input`, falling back to `default_region` when it has no country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let raw = non_blank(input.into(), RawPhoneNumber::FIELD)?;
        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        Ok(Self {
            e164: parsed.format().mode(phonenumber::Mode::E164).to_string(),
            country: parsed.country().id(),
            raw,
        })
    }

    /// Input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// Region the number belongs to, when the metadata knows it.
    pub fn country(&self) -> Option<country::Id> {
        self.country
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Per-message status returned by the SMS API (`status`).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct SmsStatus(i32);

impl SmsStatus {
    /// Construct a status from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Nexmo.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known status variant, if one exists.
    pub fn known_kind(self) -> Option<KnownSmsStatus> {
        KnownSmsStatus::from_code(self.0)
    }

    /// `true` for status `0` (message accepted).
    pub fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if resubmitting the same message later may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(
            self.known_kind(),
            Some(kind) if kind.is_retryable()
        )
    }

    /// Returns `true` if this status represents an authentication failure.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self.known_kind(),
            Some(kind) if kind.is_auth_error()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known SMS API status codes.
///
/// Unknown codes are preserved as [`SmsStatus`] and return `None` from [`KnownSmsStatus::from_code`].
pub enum KnownSmsStatus {
    Ok,
    Throttled,
    MissingParams,
    InvalidParams,
    InvalidCredentials,
    InternalError,
    InvalidMessage,
    NumberBarred,
    PartnerAccountBarred,
    PartnerQuotaViolation,
    TooManyExistingBinds,
    AccountNotEnabledForHttp,
    MessageTooLong,
    InvalidSignature,
    InvalidFromAddress,
    InvalidNetworkCode,
    InvalidCallbackUrl,
    NonWhitelistedDestination,
    SignatureAndApiSecretDisallowed,
    NumberDeactivated,
}

impl KnownSmsStatus {
    /// Convert a raw integer status into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Ok,
            1 => Self::Throttled,
            2 => Self::MissingParams,
            3 => Self::InvalidParams,
            4 => Self::InvalidCredentials,
            5 => Self::InternalError,
            6 => Self::InvalidMessage,
            7 => Self::NumberBarred,
            8 => Self::PartnerAccountBarred,
            9 => Self::PartnerQuotaViolation,
            10 => Self::TooManyExistingBinds,
            11 => Self::AccountNotEnabledForHttp,
            12 => Self::MessageTooLong,
            14 => Self::InvalidSignature,
            15 => Self::InvalidFromAddress,
            22 => Self::InvalidNetworkCode,
            23 => Self::InvalidCallbackUrl,
            29 => Self::NonWhitelistedDestination,
            32 => Self::SignatureAndApiSecretDisallowed,
            33 => Self::NumberDeactivated,
            _ => return None,
        })
    }

    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::Throttled | Self::InternalError | Self::TooManyExistingBinds
        )
    }

    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::InvalidSignature | Self::SignatureAndApiSecretDisallowed
        )
    }
}
