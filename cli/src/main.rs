//! `news` - run one news load and print the rendered page.

mod config;
mod transport;

use std::fs;
use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use news_core::{HtmlPage, NewsController, NewsService, Settled};
use tracing_subscriber::EnvFilter;

use config::Cli;
use transport::UreqTransport;

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.news_config();
    let mut page = HtmlPage::new(cli.controls()).with_default_country(&config.default_country);
    let service = NewsService::new(config, UreqTransport::new(cli.timeout()));
    let mut controller = NewsController::new(service);

    let controls = cli.controls();
    let settled = controller.load_news(&mut page, &controls);

    let document = page.to_document();
    match &cli.out {
        Some(path) => {
            fs::write(path, &document).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "page written");
        }
        None => {
            std::io::stdout()
                .write_all(document.as_bytes())
                .context("Failed to write page to stdout")?;
        }
    }

    Ok(match settled {
        Settled::Failed(err) => {
            tracing::error!(error = %err, "news load failed");
            ExitCode::FAILURE
        }
        Settled::Empty => {
            tracing::info!("no articles found");
            ExitCode::SUCCESS
        }
        Settled::Rendered(_) | Settled::Stale => ExitCode::SUCCESS,
    })
}
