//! Signed-request authentication.
//!
//! The signature covers every request parameter plus a `timestamp`:
//! ```text
//! sig = hex(HMAC(signature_secret, "&name1=value1&name2=value2..."))
//! ```
//! Parameters are sorted by name, and `&` / `=` inside values are replaced by `_`. When the
//! request carries a JSON body, its compact serialization follows the parameters as
//! `&body=<json>`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Sha256, Sha512};

use super::SigningError;
use crate::client::ApiRequest;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

pub(crate) const API_KEY_PARAM: &str = "api_key";
pub(crate) const TIMESTAMP_PARAM: &str = "timestamp";
pub(crate) const SIGNATURE_PARAM: &str = "sig";
const BODY_FIELD: &str = "body";

/// Digest used to compute `sig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureMethod {
    #[default]
    HmacSha256,
    HmacSha512,
}

/// Authenticates with the API key and a request signature keyed by the signature secret.
#[derive(Debug, Clone)]
pub struct SignatureAuth {
    api_key: String,
    signature_secret: SecretString,
    method: SignatureMethod,
}

impl SignatureAuth {
    pub(crate) fn new(
        api_key: String,
        signature_secret: SecretString,
        method: SignatureMethod,
    ) -> Self {
        Self {
            api_key,
            signature_secret,
            method,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn method(&self) -> SignatureMethod {
        self.method
    }

    /// Set `api_key`, `timestamp` and `sig` on the request parameters, replacing earlier values.
    ///
    /// The timestamp comes from the request itself, so identical requests sign identically.
    pub fn decorate(&self, mut request: ApiRequest) -> Result<ApiRequest, SigningError> {
        request.params.retain(|(name, _)| {
            !matches!(
                name.as_str(),
                API_KEY_PARAM | TIMESTAMP_PARAM | SIGNATURE_PARAM
            )
        });
        request
            .params
            .push((API_KEY_PARAM.to_owned(), self.api_key.clone()));
        request
            .params
            .push((TIMESTAMP_PARAM.to_owned(), request.timestamp.to_string()));

        let sig = sign_request(&request, self.signature_secret.expose_secret(), self.method)?;
        request.params.push((SIGNATURE_PARAM.to_owned(), sig));
        Ok(request)
    }
}

/// Compute the lowercase hex signature over `params`, ignoring any existing `sig`.
pub fn sign_params(
    params: &[(String, String)],
    secret: &str,
    method: SignatureMethod,
) -> Result<String, SigningError> {
    hmac_hex(&signing_payload(params), secret, method)
}

/// Signature over the request parameters and, when present, its JSON body.
pub fn sign_request(
    request: &ApiRequest,
    secret: &str,
    method: SignatureMethod,
) -> Result<String, SigningError> {
    let mut payload = signing_payload(&request.params);
    if let Some(json) = &request.json {
        payload.push('&');
        payload.push_str(BODY_FIELD);
        payload.push('=');
        payload.push_str(&json.to_string());
    }
    hmac_hex(&payload, secret, method)
}

fn hmac_hex(payload: &str, secret: &str, method: SignatureMethod) -> Result<String, SigningError> {
    let digest = match method {
        SignatureMethod::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
                .map_err(|e| SigningError::Hmac(e.to_string()))?;
            mac.update(payload.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignatureMethod::HmacSha512 => {
            let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
                .map_err(|e| SigningError::Hmac(e.to_string()))?;
            mac.update(payload.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(hex::encode(digest))
}

fn signing_payload(params: &[(String, String)]) -> String {
    let mut sorted = params
        .iter()
        .filter(|(name, _)| name != SIGNATURE_PARAM)
        .collect::<Vec<_>>();
    sorted.sort();

    let mut payload = String::new();
    for (name, value) in sorted {
        payload.push('&');
        payload.push_str(name);
        payload.push('=');
        payload.push_str(&value.replace(['&', '='], "_"));
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpMethod;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn auth(method: SignatureMethod) -> SignatureAuth {
        SignatureAuth::new(
            "key".to_owned(),
            SecretString::from("sig-secret".to_owned()),
            method,
        )
    }

    #[test]
    fn payload_is_sorted_and_sanitized() {
        let payload = signing_payload(&params(&[
            ("to", "447700900000"),
            ("text", "a=b&c"),
            ("from", "Acme"),
            ("sig", "ignored"),
        ]));
        assert_eq!(payload, "&from=Acme&text=a_b_c&to=447700900000");
    }

    #[test]
    fn signature_matches_known_hmac_sha256() {
        // echo -n "&a=1&b=2" | openssl dgst -sha256 -hmac secret
        let sig = sign_params(
            &params(&[("b", "2"), ("a", "1")]),
            "secret",
            SignatureMethod::HmacSha256,
        )
        .unwrap();
        assert_eq!(
            sig,
            "1ad820e7a6cea8f79fcb8ec77d44cdaaa19fbe3fffd1bbfbcc5336f94ab56457"
        );
    }

    #[test]
    fn sha512_signature_is_longer() {
        let sig = sign_params(&params(&[("a", "1")]), "secret", SignatureMethod::HmacSha512)
            .unwrap();
        assert_eq!(sig.len(), 128);
    }

    #[test]
    fn decorate_is_deterministic_for_identical_requests() {
        let mut request = ApiRequest::new(
            HttpMethod::Post,
            "https://example.invalid/sms/json",
            1_700_000_000,
        );
        request.params = params(&[("to", "447700900000"), ("text", "hi")]);

        let auth = auth(SignatureMethod::HmacSha256);
        let first = auth.decorate(request.clone()).unwrap();
        let second = auth.decorate(request).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.param("api_key"), Some("key"));
        assert_eq!(first.param("timestamp"), Some("1700000000"));
        assert!(first.param("sig").is_some());
    }

    #[test]
    fn signature_changes_with_timestamp_and_params() {
        let auth = auth(SignatureMethod::HmacSha256);

        let base = ApiRequest::new(HttpMethod::Get, "https://example.invalid", 1);
        let later = ApiRequest::new(HttpMethod::Get, "https://example.invalid", 2);
        let mut other = base.clone();
        other.params.push(("x".to_owned(), "y".to_owned()));

        let sig = |r: ApiRequest| auth.decorate(r).unwrap().param("sig").unwrap().to_owned();
        let base_sig = sig(base);
        assert_ne!(base_sig, sig(later));
        assert_ne!(base_sig, sig(other));
    }

    #[test]
    fn sig_covers_json_body() {
        let auth = auth(SignatureMethod::HmacSha256);
        let mut small = ApiRequest::new(HttpMethod::Post, "https://example.invalid/pay", 7);
        small.json = Some(serde_json::json!({ "to": "111", "amount": 1 }));
        let mut large = small.clone();
        large.json = Some(serde_json::json!({ "to": "999", "amount": 1_000_000 }));

        let small = auth.decorate(small).unwrap();
        let large = auth.decorate(large).unwrap();
        assert_ne!(small.param("sig"), large.param("sig"));

        let params_only =
            sign_params(&small.params, "sig-secret", SignatureMethod::HmacSha256).unwrap();
        assert_ne!(small.param("sig"), Some(params_only.as_str()));
    }

    #[test]
    fn redecorating_replaces_auth_params() {
        let auth = auth(SignatureMethod::HmacSha256);
        let mut request = ApiRequest::new(HttpMethod::Post, "https://example.invalid", 9);
        request.params = params(&[("to", "447700900000")]);

        let once = auth.decorate(request).unwrap();
        let mut later = once.clone();
        later.timestamp = 10;
        let twice = auth.decorate(later).unwrap();

        for name in ["api_key", "timestamp", "sig", "to"] {
            let count = twice.params.iter().filter(|(k, _)| k == name).count();
            assert_eq!(count, 1, "{name} appears {count} times");
        }
        assert_eq!(twice.param("timestamp"), Some("10"));
        assert_eq!(auth.decorate(once.clone()).unwrap(), once);
    }

    #[test]
    fn sig_covers_every_other_param() {
        let auth = auth(SignatureMethod::HmacSha256);
        let request = ApiRequest::new(HttpMethod::Get, "https://example.invalid", 5);
        let once = auth.decorate(request).unwrap();
        let sigs = once.params.iter().filter(|(k, _)| k == "sig").count();
        assert_eq!(sigs, 1);

        let resigned =
            sign_params(&once.params, "sig-secret", SignatureMethod::HmacSha256).unwrap();
        assert_eq!(once.param("sig"), Some(resigned.as_str()));
    }
}
