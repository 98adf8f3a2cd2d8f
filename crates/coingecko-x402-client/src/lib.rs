//! Pay-per-request client for the CoinGecko x402 API.
//!
//! [`X402Client`] handles the HTTP 402 flow: request -> 402 -> sign -> retry.
//! Payment terms are read from the `PAYMENT-REQUIRED` header, or from the
//! 402 body for servers that only put them there. The rest of the crate is
//! the CLI around it: wallet selection ([`config`]), the endpoint catalog
//! ([`endpoints`]) and console output ([`report`], [`runner`]).
//!
//! # Quick example
//!
//! ```no_run
//! use alloy::signers::local::PrivateKeySigner;
//! use x402_client::{ExactEvmSchemeClient, X402Client};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let signer: PrivateKeySigner = "0xYOUR_KEY".parse().unwrap();
//! let client = X402Client::new(ExactEvmSchemeClient::new(signer));
//!
//! let result = client
//!     .fetch_json("https://pro-api.coingecko.com/api/v3/x402/simple/price?ids=bitcoin&vs_currencies=usd")
//!     .await
//!     .unwrap();
//!
//! println!("{}", result.data);
//! if let Some(s) = result.settlement {
//!     println!("Paid via tx: {:?}", s.transaction);
//! }
//! # }
//! ```

pub mod config;
pub mod endpoints;
pub mod http_client;
pub mod report;
pub mod runner;

pub use config::{AppConfig, ConfigError};
pub use endpoints::{build_url, Endpoint, BASE_URL};
pub use http_client::{
    PaidJson, PaidResponse, PaymentReceipt, PaymentRequiredResponse, RequirementSource,
    X402Client,
};
pub use runner::{run_cli, Runner};

// Re-export commonly needed types from core
pub use x402::{
    EvmNetwork, ExactEvmSchemeClient, PaymentRequired, PaymentRequirements, SchemeClient,
    SettleResponse, X402Error,
};
