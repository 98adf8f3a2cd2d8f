//! Base64-JSON header encoding shared by every x402 header.

use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::X402Error;
use crate::payment::SettleResponse;

/// Serialize to JSON and base64-encode for use as a header value.
pub fn encode_header<T: Serialize>(value: &T) -> Result<String, X402Error> {
    let json = serde_json::to_vec(value)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(&json))
}

/// Decode a base64-JSON header value.
pub fn decode_header<T: DeserializeOwned>(encoded: &str) -> Result<T, X402Error> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| X402Error::InvalidPayment(format!("invalid base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| X402Error::InvalidPayment(format!("invalid JSON: {e}")))
}

/// Decode a settlement header. Servers send base64 JSON; some send the
/// JSON directly.
pub fn decode_settlement(value: &str) -> Option<SettleResponse> {
    decode_header::<SettleResponse>(value)
        .ok()
        .or_else(|| serde_json::from_str::<SettleResponse>(value).ok())
}
