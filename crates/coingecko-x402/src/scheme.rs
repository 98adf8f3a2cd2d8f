//! Client-side payment scheme abstraction.
//!
//! See [`crate::scheme_client::ExactEvmSchemeClient`] for the EVM implementation.

use crate::error::X402Error;
use crate::payment::{ExactEvmPayload, PaymentRequirements};

/// Client-side scheme: picks payment terms it can satisfy and signs them.
pub trait SchemeClient: Send + Sync {
    /// Scheme name as it appears in `accepts[].scheme`.
    fn scheme(&self) -> &str;

    /// Whether this client can pay the given requirements.
    fn supports(&self, requirements: &PaymentRequirements) -> bool;

    /// Create a signed payment for the given requirements.
    fn create_payload(
        &self,
        requirements: &PaymentRequirements,
    ) -> impl std::future::Future<Output = Result<ExactEvmPayload, X402Error>> + Send;
}
