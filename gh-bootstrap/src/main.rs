use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gh_bootstrap::bootstrap::Bootstrapper;
use gh_bootstrap::cli::Args;
use gh_bootstrap::config::Config;
use gh_bootstrap::error::Stage;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the diagnostic line
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match Config::load(&args.config).and_then(|config| config.resolve(&args)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{}", e);
            println!("{}", e.diagnostic());
            return ExitCode::FAILURE;
        }
    };

    let bootstrapper = match Bootstrapper::new(settings) {
        Ok(bootstrapper) => bootstrapper,
        Err(e) => {
            tracing::error!("{:#}", e);
            println!("Error {}: {:#}", Stage::Configuration, e);
            return ExitCode::FAILURE;
        }
    };

    match bootstrapper.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            println!("{}", e.diagnostic());
            ExitCode::FAILURE
        }
    }
}
