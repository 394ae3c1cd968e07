use crate::config::ScraperConfig;
use crate::crawlers::crawler::PageFetcher;
use crate::crawlers::shop::ShopWalker;
use crate::parsers::MarkupLocator;
use crate::results::{BrochureRecord, ShopEntry};
use scraper::Html;
use std::time::Duration;
use url::Url;

/// Walks the shop catalog and gathers the brochures of every shop
pub struct CatalogWalker<F, L> {
    shops: ShopWalker<F, L>,
    catalog_url: Url,
    delay: Duration,
}

impl<F: PageFetcher, L: MarkupLocator> CatalogWalker<F, L> {
    /// Create a walker for the catalog at `base_url` + `catalog_path`
    pub fn new(fetcher: F, locator: L, config: &ScraperConfig) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(&config.base_url)?;
        let catalog_url = base_url.join(&config.catalog_path)?;

        Ok(Self {
            shops: ShopWalker::new(fetcher, locator, base_url),
            catalog_url,
            delay: config.request_delay(),
        })
    }

    pub fn catalog_url(&self) -> &Url {
        &self.catalog_url
    }

    pub fn shop_walker(&self) -> &ShopWalker<F, L> {
        &self.shops
    }

    /// Shops listed in the catalog, in document order.
    ///
    /// Empty when the catalog page or its category listing is unavailable.
    pub async fn shop_entries(&self) -> Vec<ShopEntry> {
        let html = match self.shops.fetcher().fetch_page(&self.catalog_url).await {
            Ok(html) => html,
            Err(e) => {
                ::log::error!("Could not fetch shop catalog {}: {}", self.catalog_url, e);
                return Vec::new();
            }
        };

        self.parse_catalog(&html)
    }

    fn parse_catalog(&self, html: &str) -> Vec<ShopEntry> {
        let doc = Html::parse_document(html);
        match self.shops.locator().catalog_links(&doc) {
            Some(entries) => {
                ::log::info!("Found {} shops", entries.len());
                entries
            }
            None => {
                ::log::error!("No shop category listing found on {}", self.catalog_url);
                Vec::new()
            }
        }
    }

    /// Collect the brochures of every catalog shop, in catalog then page order.
    ///
    /// Sleeps for the configured delay between consecutive shop visits.
    pub async fn run(&self) -> Vec<BrochureRecord> {
        let shops = self.shop_entries().await;
        let total = shops.len();
        let mut all_brochures = Vec::new();

        for (i, shop) in shops.iter().enumerate() {
            ::log::info!("Processing shop {} ({}/{})", shop.name, i + 1, total);
            let brochures = self
                .shops
                .list_brochures(&shop.relative_url, &shop.name)
                .await;
            all_brochures.extend(brochures);

            if i + 1 < total && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        all_brochures
    }
}
