use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueHint};
use rank_oracle::driver::{render_table, ConsensusOptions, RequestDriver};
use rank_oracle::host::{run_once, ProcessHost};
use rank_oracle::{ExecutionPhase, RankConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DR_INPUTS: [&str; 2] = ["1", "2"];

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout carries only the reported outcome
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rank_oracle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load .env for local dev (if present)
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded .env");
    }

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RankConfig::from_file(&path.to_string_lossy())
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RankConfig::from_env().context("failed to load config from environment")?,
    };

    match cli.command {
        Commands::Exec { input, input_hex } => {
            let explicit = match (input, input_hex) {
                (Some(text), _) => Some(text.into_bytes()),
                (None, Some(encoded)) => {
                    Some(hex::decode(encoded.trim()).context("--input-hex is not valid hex")?)
                }
                (None, None) => None,
            };
            let phase = ExecutionPhase::from_config(config.feed)?;
            let mut host = ProcessHost::new(explicit, std::io::stdin(), std::io::stdout());
            let code = run_once(&mut host, &phase).await?;
            Ok(ExitCode::from(code))
        }
        Commands::Post { inputs } => {
            let driver = RequestDriver::from_config(&config.driver)?;
            tracing::info!("Signing as {}", driver.signer().public_key_hex());

            let inputs = if inputs.is_empty() {
                DEFAULT_DR_INPUTS.iter().map(|s| s.to_string()).collect()
            } else {
                inputs
            };

            println!("Posting and waiting for a result, this may take a lil while..");
            for input in inputs {
                let result = driver
                    .submit(input.as_bytes(), ConsensusOptions::None)
                    .await
                    .with_context(|| format!("data request with input {:?} failed", input))?;
                println!("{}", render_table(&result));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[derive(Parser)]
#[command(name = "rank-oracle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file; environment variables are used when absent
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the execution phase once and report its outcome on stdout
    Exec {
        /// Data request inputs as text; read from stdin when omitted
        #[arg(short, long, conflicts_with = "input_hex")]
        input: Option<String>,

        /// Data request inputs as hex bytes
        #[arg(long)]
        input_hex: Option<String>,
    },
    /// Post data requests for the oracle program and print their tallied results
    Post {
        /// Inputs to post, one request each, in order (default: "1" then "2")
        #[arg(short, long = "input")]
        inputs: Vec<String>,
    },
}
