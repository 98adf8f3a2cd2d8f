//! Console output of the CLI. Rendering is separate from printing so the
//! layout can be tested.

use std::fmt::Write;

use x402::price::{format_usd, format_usd_atomic};
use x402::{EvmNetwork, USDC_DECIMALS};

use crate::http_client::PaymentReceipt;

const RULE_WIDTH: usize = 60;

/// Advertised price of one CoinGecko x402 call, in USDC.
pub const PRICE_PER_REQUEST: &str = "$0.01";

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

pub fn banner() -> String {
    [
        "",
        "CoinGecko x402 API client",
        "",
        "Calls CoinGecko's x402-enabled endpoints, paying for each request",
        "with a USDC authorization signed by your wallet.",
        "",
        "Supported networks:",
        "  Base (EVM) - set EVM_PRIVATE_KEY",
        "",
        "Each API call costs $0.01 USDC.",
        "",
    ]
    .join("\n")
}

/// Human-readable list of the networks a wallet can pay on.
pub fn network_label(networks: &[EvmNetwork]) -> String {
    let names: Vec<&str> = networks.iter().map(|n| n.display_name()).collect();
    format!("{} (EVM)", names.join(", "))
}

pub fn client_ready(network: &str, address: &str) -> String {
    format!("X402 client initialized\n   Network: {network}\n   Wallet address: {address}")
}

pub fn suite_header(base_url: &str, network: &str) -> String {
    let rule = rule('=');
    format!(
        "\n{rule}\nCoinGecko X402 API Test Suite\n{rule}\nBase URL: {base_url}\n\
         Network: {network}\nPayment: {PRICE_PER_REQUEST} USDC per request\n{rule}"
    )
}

pub fn testing(title: &str, url: &str) -> String {
    format!("\nTesting: {title}\n   URL: {url}")
}

pub fn success(name: &str, data: &serde_json::Value, receipt: Option<&PaymentReceipt>) -> String {
    let rule = rule('=');
    let body = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    let mut out = format!("\n{rule}\nOK {name}\n{rule}\n{body}\n");
    if let Some(r) = receipt {
        let paid =
            format_usd(&r.amount, USDC_DECIMALS).unwrap_or_else(|| r.amount.clone());
        let _ = writeln!(out, "Paid {paid} on {} to {}", r.network, r.pay_to);
    }
    let _ = writeln!(out, "{rule}");
    out
}

pub fn failure(name: &str, error: &dyn std::fmt::Display) -> String {
    let rule = rule('=');
    format!("\n{rule}\nFAILED {name}\n{rule}\nError: {error}\n{rule}\n")
}

/// Pass/fail counts and the total amount authorized over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    /// Sum of paid amounts of successful calls, in USDC atomic units.
    pub spent_atomic: u128,
}

impl Summary {
    pub fn record_success(&mut self, receipt: Option<&PaymentReceipt>) {
        self.passed += 1;
        if let Some(amount) = receipt.and_then(|r| r.amount.parse::<u128>().ok()) {
            self.spent_atomic = self.spent_atomic.saturating_add(amount);
        }
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn estimated_cost(&self) -> String {
        format_usd_atomic(self.spent_atomic, USDC_DECIMALS)
            .unwrap_or_else(|| format!("{} atomic units", self.spent_atomic))
    }

    pub fn render(&self) -> String {
        let rule = rule('=');
        format!(
            "\n{rule}\nTEST SUMMARY\n{rule}\n   Passed: {}\n   Failed: {}\n   \
             Estimated cost: {} USDC\n{rule}",
            self.passed,
            self.failed,
            self.estimated_cost()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::RequirementSource;
    use serde_json::json;

    fn receipt(amount: &str) -> PaymentReceipt {
        PaymentReceipt {
            version: 2,
            source: RequirementSource::Header,
            network: "eip155:8453".to_string(),
            amount: amount.to_string(),
            asset: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
            pay_to: "0x1111111111111111111111111111111111111111".to_string(),
        }
    }

    #[test]
    fn summary_sums_paid_amounts() {
        let mut summary = Summary::default();
        summary.record_success(Some(&receipt("10000")));
        summary.record_success(Some(&receipt("10000")));
        summary.record_success(None);
        summary.record_failure();

        assert_eq!(summary.passed, 3);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_passed());
        assert_eq!(summary.estimated_cost(), "$0.02");

        let text = summary.render();
        assert!(text.contains("Passed: 3"));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("Estimated cost: $0.02 USDC"));
    }

    #[test]
    fn empty_summary_costs_nothing() {
        let summary = Summary::default();
        assert!(summary.all_passed());
        assert_eq!(summary.estimated_cost(), "$0.00");
    }

    #[test]
    fn success_block_pretty_prints_and_shows_payment() {
        let text = success("simple_price", &json!({"bitcoin": {"usd": 1}}), Some(&receipt("10000")));
        assert!(text.contains("OK simple_price"));
        assert!(text.contains("\"bitcoin\": {"));
        assert!(text.contains("Paid $0.01 on eip155:8453"));
    }

    #[test]
    fn success_block_keeps_unparseable_amount() {
        let text = success("token_price", &json!({}), Some(&receipt("0.01")));
        assert!(text.contains("Paid 0.01 on eip155:8453"));
    }

    #[test]
    fn network_label_names_every_network() {
        assert_eq!(network_label(&[EvmNetwork::Base]), "Base (EVM)");
        assert_eq!(
            network_label(&EvmNetwork::ALL),
            "Base, Base Sepolia (EVM)"
        );
    }

    #[test]
    fn failure_block_shows_error() {
        let text = failure("token_data", &"Request failed with status 500");
        assert!(text.contains("FAILED token_data"));
        assert!(text.contains("Error: Request failed with status 500"));
    }
}
