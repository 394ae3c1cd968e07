use crate::crawlers::crawler::PageFetcher;
use crate::parsers::{BrochureExtractor, MarkupLocator};
use crate::results::BrochureRecord;
use crate::utils::resolve_url;
use scraper::Html;
use url::Url;

/// Collects the brochures listed on a single shop page
pub struct ShopWalker<F, L> {
    fetcher: F,
    extractor: BrochureExtractor<L>,
    base_url: Url,
}

impl<F: PageFetcher, L: MarkupLocator> ShopWalker<F, L> {
    pub fn new(fetcher: F, locator: L, base_url: Url) -> Self {
        Self {
            fetcher,
            extractor: BrochureExtractor::new(locator, base_url.clone()),
            base_url,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn locator(&self) -> &L {
        self.extractor.locator()
    }

    /// Fetch a shop page and extract its brochures in document order.
    ///
    /// A page that cannot be fetched yields no records.
    pub async fn list_brochures(&self, shop_url: &str, shop_name: &str) -> Vec<BrochureRecord> {
        let full_url = match resolve_url(&self.base_url, shop_url) {
            Ok(url) => url,
            Err(e) => {
                ::log::error!("Invalid URL {:?} for shop {}: {}", shop_url, shop_name, e);
                return Vec::new();
            }
        };
        ::log::info!("Processing shop {}, URL: {}", shop_name, full_url);

        let html = match self.fetcher.fetch_page(&full_url).await {
            Ok(html) => html,
            Err(e) => {
                ::log::error!("Could not fetch page of shop {}: {}", shop_name, e);
                return Vec::new();
            }
        };

        self.extract_all(&html, shop_name)
    }

    /// Extract every brochure from an already fetched shop page
    pub fn extract_all(&self, html: &str, shop_name: &str) -> Vec<BrochureRecord> {
        let doc = Html::parse_document(html);
        let fragments = self.locator().brochure_fragments(&doc);
        ::log::info!("Found {} brochures for shop {}", fragments.len(), shop_name);

        fragments
            .into_iter()
            .filter_map(|fragment| {
                let record = self.extractor.extract(fragment, shop_name).ok()?;
                ::log::info!(
                    "Extracted brochure for {}: {} ({} - {})",
                    shop_name,
                    record.title,
                    record.valid_from,
                    record.valid_to
                );
                Some(record)
            })
            .collect()
    }
}
