//! Client side of the x402 pay-per-request protocol.
//!
//! A resource server answers an unpaid request with HTTP 402 and a list of
//! payment terms. The client signs a stablecoin transfer authorization for
//! one of those terms and retries with it attached.
//!
//! This crate holds the protocol pieces: wire types for v1 and v2,
//! base64-JSON header encoding, and the EVM `exact` scheme
//! ([`ExactEvmSchemeClient`]) which signs EIP-3009 `transferWithAuthorization`
//! messages for USDC. The HTTP flow lives in `coingecko-x402-client`.
//!
//! # Quick example
//!
//! ```no_run
//! use alloy::signers::local::PrivateKeySigner;
//! use x402::{ExactEvmSchemeClient, PaymentRequirements, SchemeClient};
//!
//! # async fn sign(requirements: PaymentRequirements) -> Result<(), x402::X402Error> {
//! let signer: PrivateKeySigner = "0xYOUR_KEY".parse().unwrap();
//! let scheme = ExactEvmSchemeClient::new(signer);
//!
//! if scheme.supports(&requirements) {
//!     let payload = scheme.create_payload(&requirements).await?;
//!     println!("signed by {}", payload.authorization.from);
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod eip3009;
pub mod encoding;
pub mod error;
pub mod network;
pub mod payment;
pub mod price;
pub mod scheme;
pub mod scheme_client;

pub use constants::*;
pub use encoding::{decode_header, decode_settlement, encode_header};
pub use error::X402Error;
pub use network::EvmNetwork;
pub use payment::*;
pub use price::format_usd;
pub use scheme::SchemeClient;
pub use scheme_client::ExactEvmSchemeClient;
