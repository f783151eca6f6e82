//! CLI entry point - the composition root.
//!
//! Parses arguments, resolves configuration and dispatches to handlers.
//! Errors are printed and mapped to exit codes.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lessoncache_cli::handlers::{complete, list, paths, track};
use lessoncache_cli::{Cli, CliConfig, CliError, Commands, bootstrap};

#[tokio::main]
async fn main() {
    // Load .env before parsing so env fallbacks see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_cli(&cli)?;

    match cli.command {
        Commands::Paths => paths::execute(&config),
        Commands::List => {
            let ctx = bootstrap(config).await?;
            list::execute(&ctx).await
        }
        Commands::Track {
            reference,
            video,
            step,
            lesson,
            quality,
            thumbnail,
            title,
        } => {
            let ctx = bootstrap(config).await?;
            track::execute(
                &ctx,
                track::TrackRequest {
                    reference,
                    video,
                    step,
                    lesson,
                    quality,
                    thumbnail,
                    title,
                },
            )
            .await
        }
        Commands::Complete {
            references,
            cancel,
            threads,
        } => {
            let ctx = bootstrap(config).await?;
            complete::execute(&ctx, &references, &cancel, threads)
                .await
                .map(|_| ())
        }
    }
}
