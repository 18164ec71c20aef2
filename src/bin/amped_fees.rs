//! Command-line front end for the Amped Finance fee adapter.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use amped_fees::{AmpedFees, Chain, EndpointTable};

/// Query Amped Finance protocol fees from the per-chain subgraphs
#[derive(Parser)]
#[command(name = "amped-fees")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML endpoint table (defaults to $AMPED_FEES_CONFIG, then the built-in table)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured chains with their endpoints and start dates
    Chains,

    /// Fetch daily and lifetime fees
    Fetch {
        /// Chain identifier (all configured chains if omitted)
        #[arg(long)]
        chain: Option<String>,

        /// Unix timestamp in seconds (defaults to now)
        #[arg(long, allow_hyphen_values = true)]
        timestamp: Option<i64>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> amped_fees::Result<ExitCode> {
    let endpoints = match &cli.config {
        Some(path) => EndpointTable::from_file(path)?,
        None => EndpointTable::from_env()?,
    };

    match cli.command {
        Commands::Chains => {
            let chains: Vec<_> = endpoints
                .chains()
                .map(|(chain, cfg)| {
                    json!({
                        "chain": chain,
                        "endpoint": cfg.endpoint,
                        "start": cfg.start,
                        "methodology": cfg.methodology,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&chains)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fetch { chain, timestamp } => {
            let chain = chain.as_deref().map(str::parse::<Chain>).transpose()?;
            let fees = AmpedFees::builder().endpoints(endpoints).build()?;
            let timestamp = timestamp.unwrap_or_else(|| chrono::Utc::now().timestamp());

            let (report, failed) = fetch_report(&fees, chain, timestamp)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
    }
}

/// JSON output for `fetch`, plus whether any chain failed.
///
/// With a chain, its error propagates. Without one, every configured chain
/// gets a row holding either its result or its error.
fn fetch_report(
    fees: &AmpedFees,
    chain: Option<Chain>,
    timestamp: i64,
) -> amped_fees::Result<(serde_json::Value, bool)> {
    if let Some(chain) = chain {
        let result = fees.fetch(chain, timestamp)?;
        return Ok((serde_json::to_value(result)?, false));
    }

    let mut failed = false;
    let mut rows = Vec::new();
    for (chain, result) in fees.fetch_all(timestamp) {
        match result {
            Ok(result) => rows.push(json!({ "chain": chain, "result": result })),
            Err(e) => {
                failed = true;
                rows.push(json!({ "chain": chain, "error": e.to_string() }));
            }
        }
    }
    Ok((serde_json::Value::Array(rows), failed))
}
