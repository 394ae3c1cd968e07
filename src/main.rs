use brochure_scrape::{BrochureScraper, logging};
use clap::Parser;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let args = Args::parse();
    let config = args.into_config();

    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let scraper = match BrochureScraper::new(config) {
        Ok(scraper) => scraper,
        Err(e) => {
            ::log::error!("Failed to set up scraper: {}", e);
            return;
        }
    };

    // Errors are logged along the way; the process always exits successfully
    scraper.run_and_save().await;
}
