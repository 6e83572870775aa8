mod auction;
mod config;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use std::{fs::OpenOptions, sync::Mutex};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &config::Config) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("outbid=debug".parse()?);

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let env_file = config::load_env_file(None);
    let config = config::Config::parse();
    init_logging(&config)?;
    info!(?config, ?env_file, "starting bidding pass");

    let auction_house_client = service::HttpAuctionHouseClient::new_shared(&config)?;
    let agent = service::BiddingAgent::new(auction_house_client, (&config).into());

    match service::run_guarded(|| Ok(agent.run_once()?)) {
        Ok(outcome) => info!(
            sale_id = ?outcome.sale_id(),
            bids = ?outcome.bids(),
            ?outcome,
            "bidding pass finished"
        ),
        Err(e) => error!(error = %format!("{:#}", e), "bidding pass failed"),
    }

    Ok(())
}
