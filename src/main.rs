use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod crawler;
mod extract;
mod lookups;
mod models;
mod ner;
mod pipeline;
mod report;
mod search;
mod store;

use config::{load_config, Config};
use lookups::Lookups;
use models::Result;
use pipeline::ScrapeRunner;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = cli::Args::parse();

    let config = match load_config(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", args.config, e);
            Config::default()
        }
    };

    std::env::set_var(
        "RUST_LOG",
        format!(
            "lead_harvester={},hyper=warn,reqwest=warn",
            config.logging.level
        ),
    );
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let lookups = Arc::new(Lookups::load(&config.lookups).await?);
    let api_key = std::env::var("SERP_API_KEY")
        .map_err(|_| "SERP_API_KEY is not set (put it in the environment or a .env file)")?;

    let output = cli::ensure_csv_extension(&args.output);
    let runner = Arc::new(ScrapeRunner::new(
        &config,
        args.extract_options(),
        lookups,
        api_key,
        &output,
        args.pages,
        !args.no_ner,
    )?);

    if args.pages.is_indefinite() {
        info!("Running until interrupted; press Ctrl-C when satisfied.");
    }

    tokio::select! {
        result = Arc::clone(&runner).run(args.query.clone(), args.pages, args.engine.clone()) => {
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, flushing accumulated records...");
        }
    }

    runner.flush()?;
    Ok(())
}
