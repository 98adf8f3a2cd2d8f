//! Wallet and network selection from the environment.
//!
//! Every lookup goes through a `Fn(&str) -> Option<String>` so the rules can
//! be exercised without touching the process environment.

use std::time::Duration;

use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;

use crate::endpoints::BASE_URL;
use crate::http_client::DEFAULT_TIMEOUT;

pub const EVM_PRIVATE_KEY: &str = "EVM_PRIVATE_KEY";
pub const SOLANA_PRIVATE_KEY: &str = "SOLANA_PRIVATE_KEY";
pub const NETWORK: &str = "NETWORK";
pub const BASE_URL_VAR: &str = "COINGECKO_X402_BASE_URL";
pub const TIMEOUT_VAR: &str = "X402_HTTP_TIMEOUT_SECS";

/// Substrings that mark a key as copied from a template rather than real.
pub const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your_evm_private_key_here",
    "your_solana_private_key_here",
    "your_private_key",
    "placeholder",
    "example",
    "xxx",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NETWORK={network} specified but {var} not found")]
    MissingKey {
        network: &'static str,
        var: &'static str,
    },

    #[error("{0} contains a placeholder value; replace it with your actual private key in .env")]
    PlaceholderKey(&'static str),

    #[error("Solana support is not available in this build; set EVM_PRIVATE_KEY to pay on Base")]
    SolanaUnavailable,

    #[error(
        "No valid wallet private key found; set EVM_PRIVATE_KEY=0x... (Base) \
         or SOLANA_PRIVATE_KEY=... (Solana) in .env"
    )]
    NoWallet,

    #[error("invalid EVM_PRIVATE_KEY: {0}")]
    InvalidKey(String),

    #[error("invalid {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Whether a private key looks like a template value rather than a real key.
pub fn is_placeholder_key(key: &str) -> bool {
    if key.is_empty() {
        return true;
    }
    let lower = key.to_lowercase();
    if PLACEHOLDER_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }
    if key.contains('_') {
        return true;
    }
    key.replace("0x", "").len() < 32
}

/// Network requested through `NETWORK`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NetworkPreference {
    #[default]
    Auto,
    Evm,
    Solana,
}

impl NetworkPreference {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("evm") | Some("base") => Self::Evm,
            Some("solana") | Some("svm") => Self::Solana,
            _ => Self::Auto,
        }
    }
}

/// Parse an EVM key, accepting it with or without the `0x` prefix.
pub fn parse_evm_key(key: &str) -> Result<PrivateKeySigner, ConfigError> {
    let key = key.trim();
    let prefixed = if key.starts_with("0x") {
        key.to_string()
    } else {
        format!("0x{key}")
    };
    prefixed
        .parse()
        .map_err(|e| ConfigError::InvalidKey(format!("{e}")))
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    lookup(var).filter(|v| !v.trim().is_empty())
}

/// Pick the paying wallet.
///
/// An explicit `NETWORK` must have a usable key. In auto mode a valid EVM
/// key wins; a Solana key alone is recognised but cannot pay here.
pub fn select_wallet(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<PrivateKeySigner, ConfigError> {
    let preference = NetworkPreference::parse(lookup(NETWORK).as_deref());
    // An explicit choice only treats an unset or empty key as missing, so a
    // blank key is reported as a placeholder.
    let explicit = |var: &str| lookup(var).filter(|v| !v.is_empty());

    match preference {
        NetworkPreference::Evm => {
            let key = explicit(EVM_PRIVATE_KEY).ok_or(ConfigError::MissingKey {
                network: "evm",
                var: EVM_PRIVATE_KEY,
            })?;
            if is_placeholder_key(&key) {
                return Err(ConfigError::PlaceholderKey(EVM_PRIVATE_KEY));
            }
            parse_evm_key(&key)
        }
        NetworkPreference::Solana => {
            let key = explicit(SOLANA_PRIVATE_KEY).ok_or(ConfigError::MissingKey {
                network: "solana",
                var: SOLANA_PRIVATE_KEY,
            })?;
            if is_placeholder_key(&key) {
                return Err(ConfigError::PlaceholderKey(SOLANA_PRIVATE_KEY));
            }
            Err(ConfigError::SolanaUnavailable)
        }
        NetworkPreference::Auto => {
            let evm_key = non_empty(&lookup, EVM_PRIVATE_KEY);
            let solana_key = non_empty(&lookup, SOLANA_PRIVATE_KEY);
            if let Some(key) = evm_key.filter(|k| !is_placeholder_key(k)) {
                return parse_evm_key(&key);
            }
            if solana_key.is_some_and(|k| !is_placeholder_key(&k)) {
                return Err(ConfigError::SolanaUnavailable);
            }
            Err(ConfigError::NoWallet)
        }
    }
}

/// Runtime configuration of the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub signer: PrivateKeySigner,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = non_empty(&lookup, BASE_URL_VAR)
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| BASE_URL.to_string());

        let timeout = match non_empty(&lookup, TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: TIMEOUT_VAR,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let signer = select_wallet(&lookup)?;

        Ok(Self {
            base_url,
            timeout,
            signer,
        })
    }
}
