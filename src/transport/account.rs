use serde::Deserialize;

use super::amount::Amount;
use crate::domain::BalanceResponse;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceJsonResponse {
    value: Amount,
    #[serde(rename = "autoReload", default)]
    auto_reload: bool,
}

pub fn decode_balance_json_response(json: &str) -> Result<BalanceResponse, TransportError> {
    let parsed: BalanceJsonResponse = serde_json::from_str(json)?;
    Ok(BalanceResponse {
        value: parsed.value.into_string(),
        auto_reload: parsed.auto_reload,
    })
}
