use clap::Parser;
use reviewer_roulette::commands::run_roulette;
use reviewer_roulette::{RouletteArgs, RouletteConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match RouletteConfig::from_args(RouletteArgs::parse()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_roulette(&config).await {
        Ok(outcome) => {
            log::info!(
                "Rand Maintainer = {} <{}>, Rand All Dev = {} <{}>",
                outcome.selection.maintainer.name,
                outcome.selection.maintainer.email,
                outcome.selection.developer.name,
                outcome.selection.developer.email
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Reviewer roulette failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
