//! Pulse CLI - RSI/MACD analysis of saved daily aggregates.
//!
//! Prints JSON envelopes on stdout; logs go to stderr.

use clap::{Parser, Subcommand};
use pulse_core::{analyze, Aggregates, ApiResponse, Config, DirectorySource, PriceSource};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Pulse CLI - RSI, MACD and a buy/hold/sell signal from daily closes")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.pulse/config.toml or $PULSE_CONFIG)
    #[arg(long = "config", global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a symbol's daily closes
    Analyze {
        /// Stock symbol
        #[arg(short, long)]
        symbol: String,
        /// Aggregates JSON file to read instead of the data directory
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show the resolved configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match cli.config_path.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(e) = config_error {
        tracing::error!("Failed to load configuration: {}", e);
        println!("{}", render(&ApiResponse::<()>::err(&e)));
        return ExitCode::FAILURE;
    }

    let (output, ok) = match cli.command {
        Commands::Analyze { symbol, file } => handle_analyze(&config, &symbol, file),
        Commands::Config => (render(&ApiResponse::ok(&config)), true),
    };

    println!("{}", output);
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn handle_analyze(config: &Config, symbol: &str, file: Option<PathBuf>) -> (String, bool) {
    let series = match file {
        Some(path) => Aggregates::from_path(&path).and_then(Aggregates::into_series),
        None => DirectorySource::from_config(config).load(symbol),
    };

    match series.and_then(|series| analyze(symbol, &series)) {
        Ok(report) => {
            tracing::info!(
                symbol = %report.symbol,
                recommendation = %report.recommendation,
                "Analysis complete"
            );
            (render(&ApiResponse::ok(report)), true)
        }
        Err(e) => {
            tracing::warn!(symbol = symbol, kind = e.kind(), "Analysis failed: {}", e);
            (render(&ApiResponse::<()>::err(&e)), false)
        }
    }
}

fn render<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|e| {
        format!(
            "{{\"ok\":false,\"error\":\"failed to serialize response: {}\",\"kind\":\"json\"}}",
            e.to_string().replace('"', "'")
        )
    })
}
