use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use x402_client::endpoints::Endpoint;
use x402_client::{report, run_cli, AppConfig};

fn tests_help() -> String {
    let mut help = String::from("Available tests:\n");
    for endpoint in Endpoint::ALL {
        help.push_str(&format!(
            "  {:<15} - {}\n",
            endpoint.key(),
            endpoint.description()
        ));
    }
    help.push_str("\nRun without arguments to execute all tests.");
    help
}

/// Call CoinGecko's x402 endpoints, paying per request in USDC.
#[derive(Parser, Debug)]
#[command(name = "x402-coingecko", version, after_help = tests_help())]
struct Cli {
    /// Run a single test instead of the whole suite
    test: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    println!("{}", report::banner());

    let ok = run_cli(AppConfig::from_env(), cli.test.as_deref()).await;

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
