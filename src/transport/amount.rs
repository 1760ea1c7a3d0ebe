use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

/// Decimal amount from a response, kept as the exact text the server sent.
///
/// The SMS API quotes amounts while the account API sends bare numbers; a number token such
/// as `10.00` is kept verbatim instead of being round-tripped through `f64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount(String);

impl Amount {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let token = raw.get().trim();

        if token.starts_with('"') {
            return serde_json::from_str(token).map(Self).map_err(D::Error::custom);
        }
        match serde_json::from_str::<serde_json::Number>(token) {
            Ok(_) => Ok(Self(token.to_owned())),
            Err(_) => Err(D::Error::invalid_type(
                Unexpected::Other(token),
                &"a decimal string or number",
            )),
        }
    }
}
