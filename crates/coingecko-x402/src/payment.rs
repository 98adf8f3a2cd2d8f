//! Wire types for x402 v1 and v2.
//!
//! Addresses and amounts stay strings here: a single 402 response may
//! offer EVM and Solana terms side by side, and only the scheme that
//! picks an entry knows how to parse it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::network::EvmNetwork;

/// Describes the resource a 402 response is charging for (v2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// A single entry in the `accepts` array of a v2 402 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirements {
    pub scheme: String,
    pub network: String,
    /// Amount in the asset's smallest unit.
    pub amount: String,
    pub asset: String,
    pub pay_to: String,
    pub max_timeout_seconds: u64,
    /// Scheme-specific hints, e.g. the EIP-712 domain `name`/`version`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl PaymentRequirements {
    /// Look up a string field in `extra`.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.as_ref()?.get(key)?.as_str()
    }
}

/// v2 payment terms, delivered in the `PAYMENT-REQUIRED` header or,
/// for some servers, in the 402 body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequired {
    pub x402_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceInfo>,
    #[serde(default)]
    pub accepts: Vec<PaymentRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// A single entry in the `accepts` array of a v1 402 body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirementsV1 {
    pub scheme: String,
    pub network: String,
    pub max_amount_required: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mime_type: String,
    pub pay_to: String,
    pub max_timeout_seconds: u64,
    pub asset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl PaymentRequirementsV1 {
    /// Convert to the v2 shape so signing has a single code path.
    /// Known legacy network names become CAIP-2 ids; unknown ones pass through.
    pub fn to_v2(&self) -> PaymentRequirements {
        let network = EvmNetwork::from_network_id(&self.network)
            .map(|n| n.caip2().to_string())
            .unwrap_or_else(|| self.network.clone());
        PaymentRequirements {
            scheme: self.scheme.clone(),
            network,
            amount: self.max_amount_required.clone(),
            asset: self.asset.clone(),
            pay_to: self.pay_to.clone(),
            max_timeout_seconds: self.max_timeout_seconds,
            extra: self.extra.clone(),
        }
    }
}

/// The v1 402 response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequiredV1 {
    pub x402_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub accepts: Vec<PaymentRequirementsV1>,
}

/// EIP-3009 authorization parameters. Numbers are decimal strings,
/// the nonce is `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub from: String,
    pub to: String,
    pub value: String,
    pub valid_after: String,
    pub valid_before: String,
    pub nonce: String,
}

/// Signed payload of the EVM exact scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactEvmPayload {
    pub signature: String,
    pub authorization: Authorization,
}

/// v2 payment payload (sent in `PAYMENT-SIGNATURE`, base64-encoded JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub x402_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceInfo>,
    pub accepted: PaymentRequirements,
    pub payload: ExactEvmPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// v1 payment payload (sent in `X-PAYMENT`, base64-encoded JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayloadV1 {
    pub x402_version: u32,
    pub scheme: String,
    pub network: String,
    pub payload: ExactEvmPayload,
}

/// Settlement result reported by the resource server after a paid request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettleResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    /// Transaction hash, if settlement succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_v2_payment_required_with_mixed_networks() {
        let body = json!({
            "x402Version": 2,
            "error": "Payment required",
            "resource": {
                "url": "https://pro-api.coingecko.com/api/v3/x402/simple/price",
                "mimeType": "application/json"
            },
            "accepts": [
                {
                    "scheme": "exact",
                    "network": "eip155:8453",
                    "amount": "10000",
                    "asset": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
                    "payTo": "0x1111111111111111111111111111111111111111",
                    "maxTimeoutSeconds": 300,
                    "extra": { "name": "USD Coin", "version": "2" }
                },
                {
                    "scheme": "exact",
                    "network": "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
                    "amount": "10000",
                    "asset": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "payTo": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
                    "maxTimeoutSeconds": 300,
                    "extra": { "feePayer": "2wKupLR9q6wXYppw8Gr2NvWxKBUqm4PPJKkQfoxHDBg4" }
                }
            ],
            "someFutureField": true
        });

        let parsed: PaymentRequired = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.x402_version, 2);
        assert_eq!(parsed.accepts.len(), 2);
        assert_eq!(parsed.accepts[0].extra_str("name"), Some("USD Coin"));
        assert_eq!(parsed.accepts[1].extra_str("name"), None);
        assert_eq!(
            parsed.resource.unwrap().mime_type.as_deref(),
            Some("application/json")
        );
    }

    #[test]
    fn v1_requirements_convert_to_caip2() {
        let v1: PaymentRequirementsV1 = serde_json::from_value(json!({
            "scheme": "exact",
            "network": "base",
            "maxAmountRequired": "10000",
            "resource": "https://example.com/data",
            "description": "",
            "mimeType": "application/json",
            "payTo": "0x1111111111111111111111111111111111111111",
            "maxTimeoutSeconds": 60,
            "asset": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"
        }))
        .unwrap();

        let v2 = v1.to_v2();
        assert_eq!(v2.network, "eip155:8453");
        assert_eq!(v2.amount, "10000");
        assert_eq!(v2.max_timeout_seconds, 60);
        assert!(v2.extra.is_none());
    }

    #[test]
    fn v1_unknown_network_passes_through() {
        let v1 = PaymentRequirementsV1 {
            scheme: "exact".to_string(),
            network: "polygon".to_string(),
            max_amount_required: "1".to_string(),
            resource: String::new(),
            description: String::new(),
            mime_type: String::new(),
            pay_to: String::new(),
            max_timeout_seconds: 10,
            asset: String::new(),
            extra: None,
        };
        assert_eq!(v1.to_v2().network, "polygon");
    }

    #[test]
    fn settle_response_tolerates_missing_fields() {
        let settle: SettleResponse =
            serde_json::from_str(r#"{"success":true,"transaction":"0xabc"}"#).unwrap();
        assert!(settle.success);
        assert_eq!(settle.transaction.as_deref(), Some("0xabc"));
        assert!(settle.network.is_none());
    }
}
