pub mod config;
pub mod crawlers;
pub mod logging;
pub mod output;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{LogRotation, LoggingConfig, ScraperConfig};
pub use crawlers::{CatalogWalker, FetchError, HttpFetcher, PageFetcher, ShopWalker};
pub use parsers::{MarkupLocator, ProspektLocator, Rejection, parse_date_range};
pub use results::{BrochureRecord, DateRange, ShopEntry};

use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Errors raised while assembling a scraper
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot build HTTP client: {0}")]
    Fetch(#[from] FetchError),

    #[error("invalid site URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Scrapes every shop in the catalog and writes the brochures to disk
pub struct BrochureScraper<F = HttpFetcher, L = ProspektLocator> {
    walker: CatalogWalker<F, L>,
    output_file: PathBuf,
}

impl BrochureScraper {
    /// Create a scraper that fetches over HTTP using the site layout of prospektmaschine.de
    pub fn new(config: ScraperConfig) -> Result<Self, SetupError> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_parts(fetcher, ProspektLocator, config)
    }
}

impl<F: PageFetcher, L: MarkupLocator> BrochureScraper<F, L> {
    /// Create a scraper from a custom fetcher and locator
    pub fn with_parts(fetcher: F, locator: L, config: ScraperConfig) -> Result<Self, SetupError> {
        let walker = CatalogWalker::new(fetcher, locator, &config)?;
        Ok(Self {
            walker,
            output_file: config.output_file,
        })
    }

    pub fn walker(&self) -> &CatalogWalker<F, L> {
        &self.walker
    }

    /// Collect all brochures without saving them
    pub async fn run(&self) -> Vec<BrochureRecord> {
        ::log::info!("Starting brochure scraper for {}", self.walker.catalog_url());
        let brochures = self.walker.run().await;
        ::log::info!("Found {} brochures in total", brochures.len());
        brochures
    }

    /// Collect all brochures and write them to the output file.
    ///
    /// A failed write is logged; the collected brochures are returned either way.
    pub async fn run_and_save(&self) -> Vec<BrochureRecord> {
        let start_time = Instant::now();
        let brochures = self.run().await;

        match output::save_json(&self.output_file, &brochures) {
            Ok(()) => ::log::info!(
                "Saved {} brochures to {}",
                brochures.len(),
                self.output_file.display()
            ),
            Err(e) => ::log::error!(
                "Failed to save brochures to {}: {}",
                self.output_file.display(),
                e
            ),
        }

        ::log::info!(
            "Scraper finished in {:.2} seconds",
            start_time.elapsed().as_secs_f64()
        );
        brochures
    }
}
