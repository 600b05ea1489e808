//! Quillpad - A small article management client

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quillpad::{
    api::HttpArticleApi,
    cli::{self, Cli},
    config::Config,
    services::ArticleController,
    store::create_store,
    views,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "quillpad=debug"
    } else {
        "quillpad=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::load_with_env(&cli.config)?;
    config.validate()?;
    tracing::debug!("Configuration loaded from {}", cli.config.display());

    let api = HttpArticleApi::new(&config.api)?;
    let session = create_store(&config.session);
    let mut controller = ArticleController::new(Arc::new(api), session);

    let outcome = cli::run(cli.command, &mut controller).await?;
    println!("{}", views::render(&controller));

    if !outcome.is_completed() {
        tracing::debug!("Command ended with {:?}", outcome);
        std::process::exit(1);
    }
    Ok(())
}
