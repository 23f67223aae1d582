use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vitrina::app::AppContext;
use vitrina::cli::{commands, Cli, Commands, NewsAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config.as_deref())?;

    match cli.command {
        Commands::Retail { term, site, pages } => {
            commands::scrape_retail(&ctx, &term, &site, pages).await?;
        }
        Commands::Sites => commands::list_sites(&ctx),
        Commands::Wiki {
            term,
            section,
            name,
            summary,
        } => {
            commands::wiki(&ctx, &term, section, name.as_deref(), summary).await?;
        }
        Commands::News { action } => match action {
            NewsAction::Search { keyword } => commands::news_search(&ctx, &keyword).await?,
            NewsAction::Read { url, summary } => {
                commands::news_read(&ctx, &url, summary).await?;
            }
        },
    }

    Ok(())
}
