use secrecy::{ExposeSecret, SecretString};

use crate::client::ApiRequest;

/// Authenticates with the API key and API secret sent as plain parameters.
#[derive(Debug, Clone)]
pub struct TokenAuth {
    api_key: String,
    api_secret: SecretString,
}

impl TokenAuth {
    pub const API_KEY_PARAM: &'static str = "api_key";
    pub const API_SECRET_PARAM: &'static str = "api_secret";

    pub(crate) fn new(api_key: String, api_secret: SecretString) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Set `api_key` and `api_secret`, replacing values from an earlier decoration.
    pub fn decorate(&self, mut request: ApiRequest) -> ApiRequest {
        request
            .params
            .retain(|(name, _)| name != Self::API_KEY_PARAM && name != Self::API_SECRET_PARAM);
        request
            .params
            .push((Self::API_KEY_PARAM.to_owned(), self.api_key.clone()));
        request.params.push((
            Self::API_SECRET_PARAM.to_owned(),
            self.api_secret.expose_secret().to_owned(),
        ));
        request
    }
}
