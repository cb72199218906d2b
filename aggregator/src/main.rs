//! One-shot job aggregation run
//!
//! Searches the configured job boards for postings from the past day
//! and appends them to the Google Sheet, then exits.

use aggregator::JobAggregator;
use common::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    println!("🔍 Searching job boards for postings from the past 24 hours...\n");

    let aggregator = JobAggregator::from_config(&config);
    match aggregator.run_job_aggregation().await {
        Ok(results) if !results.is_empty() => {
            println!("Appended {} job results to Google Sheet.", results.len());
        }
        Ok(_) => println!("No job results found in the past 24 hours."),
        Err(e) => {
            eprintln!("Error during job search: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
