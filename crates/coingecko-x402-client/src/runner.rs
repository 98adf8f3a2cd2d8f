use x402::{ExactEvmSchemeClient, SchemeClient, X402Error};

use crate::config::{AppConfig, ConfigError};
use crate::endpoints::Endpoint;
use crate::http_client::{PaidJson, X402Client};
use crate::report::{self, Summary};

/// Runs catalog endpoints through a paying client and prints the results.
pub struct Runner<S: SchemeClient> {
    client: X402Client<S>,
    base_url: String,
}

impl<S: SchemeClient> Runner<S> {
    pub fn new(client: X402Client<S>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one endpoint without printing its result.
    pub async fn call(&self, endpoint: Endpoint) -> Result<PaidJson, X402Error> {
        let url = endpoint.url(&self.base_url);
        println!("{}", report::testing(endpoint.title(), &url));
        self.client.fetch_json(&url).await
    }

    /// Run the endpoint registered under `key`. Returns whether it succeeded;
    /// an unknown key lists the available ones and counts as a failure.
    pub async fn run_single(&self, key: &str) -> bool {
        let Some(endpoint) = Endpoint::from_key(key) else {
            println!("Unknown test: {key}");
            println!("Available tests: {}", Endpoint::available_keys());
            return false;
        };

        match self.call(endpoint).await {
            Ok(result) => {
                println!(
                    "{}",
                    report::success(endpoint.key(), &result.data, result.receipt.as_ref())
                );
                true
            }
            Err(e) => {
                tracing::debug!(endpoint = %endpoint, error = ?e, "endpoint failed");
                println!("{}", report::failure(endpoint.key(), &e));
                false
            }
        }
    }

    /// Run every endpoint in order, continuing past failures.
    pub async fn run_all(&self) -> Summary {
        let mut summary = Summary::default();
        for endpoint in Endpoint::ALL {
            match self.call(endpoint).await {
                Ok(result) => {
                    println!(
                        "{}",
                        report::success(endpoint.title(), &result.data, result.receipt.as_ref())
                    );
                    summary.record_success(result.receipt.as_ref());
                }
                Err(e) => {
                    tracing::debug!(endpoint = %endpoint, error = ?e, "endpoint failed");
                    println!("{}", report::failure(endpoint.title(), &e));
                    summary.record_failure();
                }
            }
        }
        println!("{}", summary.render());
        summary
    }
}

/// Run the CLI against a loaded configuration: one endpoint when `test` is
/// given, the whole catalog otherwise.
///
/// Returns `false` on a configuration error, an unknown test name, or any
/// failed call. The binary maps that to its exit status.
pub async fn run_cli(config: Result<AppConfig, ConfigError>, test: Option<&str>) -> bool {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return false;
        }
    };

    let scheme = ExactEvmSchemeClient::new(config.signer.clone());
    let client = match X402Client::with_timeout(scheme, config.timeout) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return false;
        }
    };
    let network = report::network_label(client.scheme().networks());
    println!(
        "{}",
        report::client_ready(&network, &client.scheme().address().to_string())
    );
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "configured");

    let runner = Runner::new(client, config.base_url);
    match test {
        Some(test) => runner.run_single(test).await,
        None => {
            println!("{}", report::suite_header(runner.base_url(), &network));
            runner.run_all().await.all_passed()
        }
    }
}
