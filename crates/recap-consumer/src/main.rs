//! recap-consumer binary
//!
//! Reads a batch of decoded change records (JSON array of
//! `{ "schema": ..., "data": ... }` objects) from the file named by the
//! first argument, or stdin, and processes it to completion.

use std::io::Read;

use tracing::info;

use recap_client::{MappingsClient, PlatformClient, ScsbClient};
use recap_consumer::config::Config;
use recap_consumer::reference_loader::load_reference_data;
use recap_consumer::router::EventRecord;
use recap_consumer::process_batch;
use recap_core::Reconciler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let records: Vec<EventRecord> = serde_json::from_str(&raw)?;
    info!(records = records.len(), "received change record batch");

    let scsb = ScsbClient::new(&config.scsb_api_base_url, &config.scsb_api_key)?;
    let platform = PlatformClient::new(
        &config.platform_api_base_url,
        config.platform_api_token.clone(),
    )?;
    let mappings = MappingsClient::new(&config.mappings_base_url)?;

    let reference = load_reference_data(&mappings, &config.mixed_bibs_path).await?;
    let reconciler = Reconciler::new(&reference, &scsb, &platform, &config.notification_email);

    let summary = process_batch(records, &reconciler, &platform).await?;
    info!(
        records = summary.records,
        posted = summary.posted,
        skipped = summary.skipped,
        "batch complete"
    );

    Ok(())
}
