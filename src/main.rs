use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use freshet::app::AppContext;
use freshet::cli::{commands, Cli, Commands};
use freshet::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    cli.apply_overrides(&mut config)?;

    let ctx = AppContext::new(config)?;

    match cli.command {
        Some(Commands::Watch { ref urls, cycles }) => {
            commands::watch_feeds(&ctx, urls, cycles).await?;
        }
        Some(Commands::Fetch { ref url }) => {
            commands::fetch_feed(&ctx, url).await?;
        }
        Some(Commands::Tui { urls }) => {
            freshet::tui::run(Arc::new(ctx), urls).await?;
        }
        None => {
            freshet::tui::run(Arc::new(ctx), Vec::new()).await?;
        }
    }

    Ok(())
}
