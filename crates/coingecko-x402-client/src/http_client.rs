use std::time::Duration;

use reqwest::{Method, StatusCode};
use x402::{
    decode_header, decode_settlement, encode_header, PaymentPayload, PaymentPayloadV1,
    PaymentRequired, PaymentRequiredV1, PaymentRequirements, SchemeClient, SettleResponse,
    X402Error, ACCESS_CONTROL_EXPOSE_HEADERS, EXPOSE_PAYMENT_HEADERS, PAYMENT_REQUIRED_HEADER,
    PAYMENT_RESPONSE_HEADER, PAYMENT_SIGNATURE_HEADER, X402_VERSION_V1, X402_VERSION_V2,
    X_PAYMENT_HEADER, X_PAYMENT_RESPONSE_HEADER,
};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the payment terms of a 402 response were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementSource {
    /// `PAYMENT-REQUIRED` header (standard v2).
    Header,
    /// JSON body of the 402 response.
    Body,
}

/// Payment terms extracted from a 402 response.
#[derive(Debug, Clone)]
pub enum PaymentRequiredResponse {
    V2 {
        required: PaymentRequired,
        source: RequirementSource,
    },
    V1(PaymentRequiredV1),
}

impl PaymentRequiredResponse {
    /// Resolve payment terms from a 402 response. The header wins when it
    /// decodes; otherwise the body is read as v2, then v1.
    pub fn parse(header: Option<&str>, body: &[u8]) -> Result<Self, X402Error> {
        if let Some(value) = header {
            match decode_header::<PaymentRequired>(value) {
                Ok(required) if required.x402_version == X402_VERSION_V2 => {
                    return Ok(Self::V2 {
                        required,
                        source: RequirementSource::Header,
                    });
                }
                Ok(required) => tracing::warn!(
                    version = required.x402_version,
                    "ignoring PAYMENT-REQUIRED header with unexpected version"
                ),
                Err(e) => tracing::warn!(error = %e, "undecodable PAYMENT-REQUIRED header"),
            }
        }

        let json: serde_json::Value = serde_json::from_slice(body).map_err(|_| {
            X402Error::PaymentRequiredParse("402 response body is not valid JSON".to_string())
        })?;

        match json.get("x402Version").and_then(serde_json::Value::as_u64) {
            Some(v) if v == u64::from(X402_VERSION_V2) => {
                tracing::debug!("payment terms delivered in 402 body (v2)");
                Ok(Self::V2 {
                    required: serde_json::from_value(json)?,
                    source: RequirementSource::Body,
                })
            }
            Some(v) if v == u64::from(X402_VERSION_V1) => {
                Ok(Self::V1(serde_json::from_value(json)?))
            }
            _ => Err(X402Error::PaymentRequiredParse(
                "402 response missing x402Version in body".to_string(),
            )),
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            Self::V2 { .. } => X402_VERSION_V2,
            Self::V1(_) => X402_VERSION_V1,
        }
    }

    pub fn source(&self) -> RequirementSource {
        match self {
            Self::V2 { source, .. } => *source,
            Self::V1(_) => RequirementSource::Body,
        }
    }

    /// Offered terms in the v2 shape, in server order.
    pub fn accepts(&self) -> Vec<PaymentRequirements> {
        match self {
            Self::V2 { required, .. } => required.accepts.clone(),
            Self::V1(required) => required.accepts.iter().map(|r| r.to_v2()).collect(),
        }
    }
}

/// What was paid for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub version: u32,
    pub source: RequirementSource,
    pub network: String,
    pub amount: String,
    pub asset: String,
    pub pay_to: String,
}

/// Final response of [`X402Client::fetch`].
#[derive(Debug)]
pub struct PaidResponse {
    pub response: reqwest::Response,
    /// Present when the request needed a payment.
    pub receipt: Option<PaymentReceipt>,
    pub settlement: Option<SettleResponse>,
}

/// Parsed JSON result of [`X402Client::fetch_json`].
#[derive(Debug, Clone)]
pub struct PaidJson {
    pub data: serde_json::Value,
    pub receipt: Option<PaymentReceipt>,
    pub settlement: Option<SettleResponse>,
}

/// HTTP client that automatically handles 402 payment responses.
///
/// Wraps `reqwest::Client`. On a 402 response, it resolves the payment
/// terms (header or body), signs an authorization via the provided
/// [`SchemeClient`], and retries the request once with the payment attached.
pub struct X402Client<S: SchemeClient> {
    http: reqwest::Client,
    scheme: S,
}

impl<S: SchemeClient> X402Client<S> {
    pub fn new(scheme: S) -> Self {
        Self::with_timeout(scheme, DEFAULT_TIMEOUT).expect("failed to build HTTP client")
    }

    pub fn with_timeout(scheme: S, timeout: Duration) -> Result<Self, X402Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| X402Error::HttpError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, scheme })
    }

    /// Create a client with a custom reqwest::Client.
    pub fn with_http_client(scheme: S, http: reqwest::Client) -> Self {
        Self { http, scheme }
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Make a request, automatically handling 402 payment responses.
    pub async fn fetch(&self, url: &str, method: Method) -> Result<PaidResponse, X402Error> {
        let resp = self
            .http
            .request(method.clone(), url)
            .send()
            .await
            .map_err(|e| X402Error::HttpError(format!("request failed: {e}")))?;

        if resp.status() != StatusCode::PAYMENT_REQUIRED {
            return Ok(PaidResponse {
                response: resp,
                receipt: None,
                settlement: None,
            });
        }

        let header = resp
            .headers()
            .get(PAYMENT_REQUIRED_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp
            .bytes()
            .await
            .map_err(|e| X402Error::HttpError(format!("failed to read 402 body: {e}")))?;

        let required = PaymentRequiredResponse::parse(header.as_deref(), &body)?;
        let accepts = required.accepts();

        let (index, requirements) = accepts
            .iter()
            .enumerate()
            .find(|(_, r)| self.scheme.supports(r))
            .ok_or_else(|| {
                X402Error::UnsupportedScheme(format!(
                    "no supported payment option in {:?}",
                    accepts
                        .iter()
                        .map(|r| format!("{}@{}", r.scheme, r.network))
                        .collect::<Vec<_>>()
                ))
            })?;

        tracing::info!(
            url,
            version = required.version(),
            source = ?required.source(),
            network = %requirements.network,
            amount = %requirements.amount,
            "payment required"
        );

        let payload = self.scheme.create_payload(requirements).await?;

        let mut req = self.http.request(method, url);
        req = match &required {
            PaymentRequiredResponse::V2 { required: terms, .. } => {
                let encoded = encode_header(&PaymentPayload {
                    x402_version: X402_VERSION_V2,
                    resource: terms.resource.clone(),
                    accepted: requirements.clone(),
                    payload,
                    extensions: terms.extensions.clone(),
                })?;
                req.header(PAYMENT_SIGNATURE_HEADER, encoded)
                    .header(ACCESS_CONTROL_EXPOSE_HEADERS, EXPOSE_PAYMENT_HEADERS)
            }
            PaymentRequiredResponse::V1(terms) => {
                // v1 payloads echo the network name exactly as offered.
                let offered = &terms.accepts[index];
                let encoded = encode_header(&PaymentPayloadV1 {
                    x402_version: X402_VERSION_V1,
                    scheme: offered.scheme.clone(),
                    network: offered.network.clone(),
                    payload,
                })?;
                req.header(X_PAYMENT_HEADER, encoded)
            }
        };

        let resp = req
            .send()
            .await
            .map_err(|e| X402Error::HttpError(format!("paid request failed: {e}")))?;

        let settlement = [PAYMENT_RESPONSE_HEADER, X_PAYMENT_RESPONSE_HEADER]
            .into_iter()
            .find_map(|name| resp.headers().get(name))
            .and_then(|v| v.to_str().ok())
            .and_then(decode_settlement);

        if let Some(s) = &settlement {
            tracing::info!(
                success = s.success,
                transaction = s.transaction.as_deref().unwrap_or("-"),
                "payment settled"
            );
        }

        Ok(PaidResponse {
            response: resp,
            receipt: Some(PaymentReceipt {
                version: required.version(),
                source: required.source(),
                network: requirements.network.clone(),
                amount: requirements.amount.clone(),
                asset: requirements.asset.clone(),
                pay_to: requirements.pay_to.clone(),
            }),
            settlement,
        })
    }

    /// GET `url`, paying if asked, and parse the successful body as JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<PaidJson, X402Error> {
        let paid = self.fetch(url, Method::GET).await?;

        let status = paid.response.status();
        if !status.is_success() {
            return Err(match paid.receipt {
                Some(_) => X402Error::PaidRequestStatus(status.as_u16()),
                None => X402Error::RequestStatus(status.as_u16()),
            });
        }

        let bytes = paid
            .response
            .bytes()
            .await
            .map_err(|e| X402Error::HttpError(format!("failed to read response body: {e}")))?;
        let data = serde_json::from_slice(&bytes).map_err(|_| X402Error::InvalidJson)?;

        Ok(PaidJson {
            data,
            receipt: paid.receipt,
            settlement: paid.settlement,
        })
    }
}
