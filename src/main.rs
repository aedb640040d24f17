use std::collections::HashSet;

use clap::Parser;
use tracing::info;

use laptop_watch::config::Config;
use laptop_watch::crawler::Crawler;
use laptop_watch::fetcher::HttpFetcher;
use laptop_watch::logging;
use laptop_watch::reconciler;
use laptop_watch::store::CsvStore;

#[derive(Parser)]
#[command(name = "laptop-watch")]
#[command(about = "Laptop listing price watcher for the hotline.ua catalog")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Override the output CSV path
    #[arg(long)]
    output: Option<String>,

    /// Specific models to keep (comma-separated). Default: keep all listings
    #[arg(long)]
    models: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(output) = cli.output {
        config.store.output_path = output;
    }
    if let Some(models) = cli.models {
        config.models = models.split(',').map(|s| s.trim().to_string()).collect();
    }

    let allow: Option<HashSet<String>> = if config.models.is_empty() {
        None
    } else {
        Some(config.models.iter().cloned().collect())
    };

    info!(url = %config.target.category_url, "Starting crawl");
    let fetcher = HttpFetcher::new(&config.target, &config.fetch)?;
    let crawler = Crawler::new(Box::new(fetcher), allow);
    let listings = crawler.crawl().await?;

    let store = CsvStore::new(&config.store.output_path);
    let changes = reconciler::reconcile_and_save(&store, &listings)?;

    println!("\n📊 Run summary:");
    println!("   Listings: {}", listings.len());
    println!("   Price changes: {}", changes.len());
    println!("   Output file: {}", config.store.output_path);

    Ok(())
}
