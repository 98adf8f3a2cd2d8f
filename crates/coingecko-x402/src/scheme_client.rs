use alloy::primitives::{Address, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::constants::{SCHEME_EXACT, VALID_AFTER_SKEW_SECS};
use crate::eip3009::{self, TransferWithAuthorization};
use crate::network::EvmNetwork;
use crate::payment::{Authorization, ExactEvmPayload, PaymentRequirements};
use crate::scheme::SchemeClient;
use crate::X402Error;

/// Client-side `exact` scheme for EVM networks: signs EIP-3009
/// `transferWithAuthorization` messages for the requested USDC amount.
pub struct ExactEvmSchemeClient {
    signer: PrivateKeySigner,
    networks: Vec<EvmNetwork>,
}

impl ExactEvmSchemeClient {
    /// Create a client that pays on every known EVM network.
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self::with_networks(signer, EvmNetwork::ALL.to_vec())
    }

    /// Create a client restricted to the given networks.
    pub fn with_networks(signer: PrivateKeySigner, networks: Vec<EvmNetwork>) -> Self {
        Self { signer, networks }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn networks(&self) -> &[EvmNetwork] {
        &self.networks
    }
}

/// EIP-712 domain name and version for the asset, preferring the hints the
/// server put in `extra` over the network's USDC defaults.
fn domain_params(requirements: &PaymentRequirements, network: EvmNetwork) -> (String, String) {
    let (default_name, default_version) = network.usdc_domain();
    let name = requirements.extra_str("name").unwrap_or(default_name);
    let version = requirements.extra_str("version").unwrap_or(default_version);
    (name.to_string(), version.to_string())
}

fn unix_now() -> Result<u64, X402Error> {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| X402Error::ConfigError(format!("system time error: {e}")))
}

impl SchemeClient for ExactEvmSchemeClient {
    fn scheme(&self) -> &str {
        SCHEME_EXACT
    }

    fn supports(&self, requirements: &PaymentRequirements) -> bool {
        requirements.scheme == SCHEME_EXACT
            && EvmNetwork::from_network_id(&requirements.network)
                .is_some_and(|n| self.networks.contains(&n))
    }

    async fn create_payload(
        &self,
        requirements: &PaymentRequirements,
    ) -> Result<ExactEvmPayload, X402Error> {
        let network = EvmNetwork::from_network_id(&requirements.network).ok_or_else(|| {
            X402Error::UnsupportedScheme(format!("unknown network {}", requirements.network))
        })?;

        let token: Address = requirements
            .asset
            .parse()
            .map_err(|e| X402Error::InvalidPayment(format!("invalid asset address: {e}")))?;
        let pay_to: Address = requirements
            .pay_to
            .parse()
            .map_err(|e| X402Error::InvalidPayment(format!("invalid payTo address: {e}")))?;
        let value = requirements
            .amount
            .parse::<U256>()
            .map_err(|e| X402Error::InvalidPayment(format!("invalid amount: {e}")))?;

        let now = unix_now()?;
        let valid_after = now.saturating_sub(VALID_AFTER_SKEW_SECS);
        let valid_before = now.saturating_add(requirements.max_timeout_seconds);
        let nonce = eip3009::random_nonce();

        let auth = TransferWithAuthorization {
            from: self.signer.address(),
            to: pay_to,
            value,
            validAfter: U256::from(valid_after),
            validBefore: U256::from(valid_before),
            nonce,
        };

        let (name, version) = domain_params(requirements, network);
        let domain = eip3009::domain(&name, &version, network.chain_id(), token);
        let sig = self
            .signer
            .sign_hash_sync(&eip3009::signing_hash(&auth, &domain))
            .map_err(|e| X402Error::SignatureError(format!("signing failed: {e}")))?;

        tracing::debug!(
            network = %network,
            amount = %value,
            pay_to = %pay_to,
            "signed transferWithAuthorization"
        );

        Ok(ExactEvmPayload {
            signature: eip3009::encode_signature_hex(&sig),
            authorization: Authorization {
                from: self.signer.address().to_string(),
                to: pay_to.to_string(),
                value: value.to_string(),
                valid_after: valid_after.to_string(),
                valid_before: valid_before.to_string(),
                nonce: nonce.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{hex, FixedBytes};
    use serde_json::json;

    fn requirements(network: &str) -> PaymentRequirements {
        PaymentRequirements {
            scheme: SCHEME_EXACT.to_string(),
            network: network.to_string(),
            amount: "10000".to_string(),
            asset: EvmNetwork::Base.usdc().to_string(),
            pay_to: Address::repeat_byte(0x11).to_string(),
            max_timeout_seconds: 300,
            extra: Some(json!({ "name": "USD Coin", "version": "2" })),
        }
    }

    #[test]
    fn supports_exact_on_known_networks_only() {
        let client = ExactEvmSchemeClient::new(PrivateKeySigner::random());
        assert!(client.supports(&requirements("eip155:8453")));
        assert!(client.supports(&requirements("base")));
        assert!(!client.supports(&requirements("eip155:1")));
        assert!(!client.supports(&requirements("solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp")));

        let mut upto = requirements("eip155:8453");
        upto.scheme = "upto".to_string();
        assert!(!client.supports(&upto));
    }

    #[test]
    fn restricted_networks_are_respected() {
        let client = ExactEvmSchemeClient::with_networks(
            PrivateKeySigner::random(),
            vec![EvmNetwork::BaseSepolia],
        );
        assert!(!client.supports(&requirements("eip155:8453")));
        assert!(client.supports(&requirements("eip155:84532")));
    }

    #[tokio::test]
    async fn payload_signature_recovers_to_signer() {
        let signer = PrivateKeySigner::random();
        let client = ExactEvmSchemeClient::new(signer.clone());
        let reqs = requirements("eip155:8453");

        let payload = client.create_payload(&reqs).await.unwrap();
        let auth = &payload.authorization;
        assert_eq!(auth.from, signer.address().to_string());
        assert_eq!(auth.value, "10000");
        assert!(payload.signature.starts_with("0x"));
        assert_eq!(payload.signature.len(), 132);

        let valid_after: u64 = auth.valid_after.parse().unwrap();
        let valid_before: u64 = auth.valid_before.parse().unwrap();
        assert_eq!(valid_before - valid_after, VALID_AFTER_SKEW_SECS + 300);

        let nonce: FixedBytes<32> = auth.nonce.parse().unwrap();
        let message = TransferWithAuthorization {
            from: auth.from.parse().unwrap(),
            to: auth.to.parse().unwrap(),
            value: auth.value.parse().unwrap(),
            validAfter: U256::from(valid_after),
            validBefore: U256::from(valid_before),
            nonce,
        };
        let domain = eip3009::domain("USD Coin", "2", 8453, EvmNetwork::Base.usdc());
        let sig = hex::decode(payload.signature.trim_start_matches("0x")).unwrap();
        let recovered = eip3009::verify_signature(&message, &domain, &sig).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[tokio::test]
    async fn rejects_malformed_amount() {
        let client = ExactEvmSchemeClient::new(PrivateKeySigner::random());
        let mut reqs = requirements("eip155:8453");
        reqs.amount = "0.01".to_string();
        let err = client.create_payload(&reqs).await.unwrap_err();
        assert!(matches!(err, X402Error::InvalidPayment(_)));
    }

    #[test]
    fn domain_falls_back_to_network_defaults() {
        let mut reqs = requirements("eip155:84532");
        reqs.extra = None;
        assert_eq!(
            domain_params(&reqs, EvmNetwork::BaseSepolia),
            ("USDC".to_string(), "2".to_string())
        );

        reqs.extra = Some(json!({ "name": "Custom" }));
        assert_eq!(
            domain_params(&reqs, EvmNetwork::BaseSepolia),
            ("Custom".to_string(), "2".to_string())
        );
    }
}
