//! CLI entry point for the Webshare check harness.

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use webshare_core::WebshareClient;

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.host_config()?;
    debug!(username = %args.username, link = %args.link, "Starting checks");

    println!("{}\n", cli::banner(&args));

    let mut client = WebshareClient::new(&args.link, &args.username, &args.password, config)?;

    let tier = client.verify().await;
    println!("Testing login: {}", cli::login_report(tier));

    let outcome = client.get_download_info().await;
    println!("Testing link: {}", cli::link_report(&outcome, client.host_codes()));
    if let Some(url) = outcome.url() {
        debug!(download_url = %url, "Resolved");
    }

    println!("\nDone");
    Ok(())
}
