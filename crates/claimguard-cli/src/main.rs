mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use claimguard_config::Config;
use std::sync::Arc;

use cli::Commands;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let registry = Arc::new(commands::build_registry(&config)?);

    match cli.command {
        Commands::Redact {
            input,
            detectors,
            report,
        } => commands::scan::redact(registry, input.as_deref(), &detectors, report),
        Commands::Audit {
            input,
            detectors,
            context_chars,
        } => commands::scan::audit(registry, &config, input.as_deref(), &detectors, context_chars),
        Commands::Enrich {
            instruction,
            input,
            no_filter,
            text,
        } => {
            commands::pipeline::enrich(
                registry,
                &config,
                &instruction,
                input.as_deref(),
                no_filter,
                text,
            )
            .await
        }
        Commands::Validate { extracted, input } => {
            commands::pipeline::validate(&config, &extracted, input.as_deref()).await
        }
        Commands::Detectors => commands::detectors::list(&registry),
    }
}
