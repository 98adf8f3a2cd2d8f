//! EVM networks the exact scheme can pay on.
//!
//! x402 v1 names networks by a short legacy name (`base`), v2 by CAIP-2
//! (`eip155:8453`). [`EvmNetwork::from_network_id`] accepts either.

use alloy::primitives::{address, Address};

/// USDC on Base mainnet.
pub const USDC_BASE: Address = address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

/// USDC on Base Sepolia.
pub const USDC_BASE_SEPOLIA: Address = address!("0x036CbD53842c5426634e7929541eC2318f3dCF7e");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvmNetwork {
    Base,
    BaseSepolia,
}

impl EvmNetwork {
    pub const ALL: [EvmNetwork; 2] = [EvmNetwork::Base, EvmNetwork::BaseSepolia];

    pub fn chain_id(self) -> u64 {
        match self {
            EvmNetwork::Base => 8453,
            EvmNetwork::BaseSepolia => 84532,
        }
    }

    /// CAIP-2 identifier used by x402 v2.
    pub fn caip2(self) -> &'static str {
        match self {
            EvmNetwork::Base => "eip155:8453",
            EvmNetwork::BaseSepolia => "eip155:84532",
        }
    }

    /// Network name used by x402 v1.
    pub fn legacy_name(self) -> &'static str {
        match self {
            EvmNetwork::Base => "base",
            EvmNetwork::BaseSepolia => "base-sepolia",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EvmNetwork::Base => "Base",
            EvmNetwork::BaseSepolia => "Base Sepolia",
        }
    }

    pub fn usdc(self) -> Address {
        match self {
            EvmNetwork::Base => USDC_BASE,
            EvmNetwork::BaseSepolia => USDC_BASE_SEPOLIA,
        }
    }

    /// EIP-712 domain `(name, version)` of the USDC contract on this network.
    /// Used when a payment requirement carries no `extra` domain hints.
    pub fn usdc_domain(self) -> (&'static str, &'static str) {
        match self {
            EvmNetwork::Base => ("USD Coin", "2"),
            EvmNetwork::BaseSepolia => ("USDC", "2"),
        }
    }

    /// Resolve a v1 legacy name or a v2 CAIP-2 id.
    pub fn from_network_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|n| n.caip2() == id || n.legacy_name().eq_ignore_ascii_case(id))
    }
}

impl std::fmt::Display for EvmNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.caip2())
    }
}
