/// Header carrying base64 v2 payment requirements on a 402 response.
pub const PAYMENT_REQUIRED_HEADER: &str = "PAYMENT-REQUIRED";

/// Header carrying the base64 v2 payment payload on the paid retry.
pub const PAYMENT_SIGNATURE_HEADER: &str = "PAYMENT-SIGNATURE";

/// Header carrying the settlement result (v2).
pub const PAYMENT_RESPONSE_HEADER: &str = "PAYMENT-RESPONSE";

/// v1 header carrying the base64 payment payload on the paid retry.
pub const X_PAYMENT_HEADER: &str = "X-PAYMENT";

/// v1 header carrying the settlement result.
pub const X_PAYMENT_RESPONSE_HEADER: &str = "X-PAYMENT-RESPONSE";

pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";

/// Value sent with `Access-Control-Expose-Headers` on v2 paid retries.
pub const EXPOSE_PAYMENT_HEADERS: &str = "PAYMENT-RESPONSE,X-PAYMENT-RESPONSE";

/// x402 scheme name for fixed-amount transfers.
pub const SCHEME_EXACT: &str = "exact";

pub const X402_VERSION_V1: u32 = 1;
pub const X402_VERSION_V2: u32 = 2;

/// Authorizations become valid this many seconds before signing, to absorb
/// clock skew between the client and the facilitator.
pub const VALID_AFTER_SKEW_SECS: u64 = 600;

/// USDC has 6 decimal places on every supported network.
pub const USDC_DECIMALS: u32 = 6;
