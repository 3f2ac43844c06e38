//! CLI entry point - the composition root.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use adobe_mcp_bridge::Registry;
use adobe_mcp_cli::{Cli, Commands, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = handlers::load_settings(cli.env_file.as_deref())?;

    match cli.command {
        Commands::Send {
            application,
            command,
            params,
        } => {
            let parameters = handlers::parse_params(params.as_deref())?;
            let registry = Registry::from_settings(&settings)
                .await
                .context("Failed to register endpoints")?;

            let outcome = handlers::send(&registry, &application, &command, parameters).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);

            if outcome.success {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Endpoints => {
            let endpoints = settings
                .endpoints()
                .context("Invalid endpoint settings")?;
            for line in handlers::endpoint_table(&endpoints) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
