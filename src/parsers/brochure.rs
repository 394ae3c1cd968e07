use crate::parsers::dates::parse_date_range;
use crate::parsers::html::MarkupLocator;
use crate::results::BrochureRecord;
use crate::utils::resolve_url;
use chrono::{Local, NaiveDateTime, SubsecRound};
use scraper::ElementRef;
use thiserror::Error;
use url::Url;

/// Why a brochure fragment did not produce a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("brochure is marked as expired")]
    Stale,

    #[error("no title")]
    MissingTitle,

    #[error("no thumbnail URL")]
    MissingThumbnail,

    #[error("thumbnail URL {url:?} cannot be resolved: {reason}")]
    InvalidThumbnail { url: String, reason: String },

    #[error("no validity dates")]
    MissingValidity,

    #[error("unparseable validity dates {text:?}")]
    InvalidValidity { text: String },
}

/// Turns brochure fragments into records
#[derive(Debug, Clone)]
pub struct BrochureExtractor<L> {
    locator: L,
    base_url: Url,
}

impl<L: MarkupLocator> BrochureExtractor<L> {
    pub fn new(locator: L, base_url: Url) -> Self {
        Self { locator, base_url }
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Extract one brochure, stamping it with the current local time.
    ///
    /// Rejections are logged (expired brochures at debug, the rest at warn).
    pub fn extract(
        &self,
        fragment: ElementRef<'_>,
        shop_name: &str,
    ) -> Result<BrochureRecord, Rejection> {
        let parsed_at = Local::now().naive_local().trunc_subsecs(0);
        let result = self.extract_at(fragment, shop_name, parsed_at);

        match &result {
            Err(Rejection::Stale) => {
                ::log::debug!("Skipping expired brochure for shop {}", shop_name)
            }
            Err(reason) => ::log::warn!("Rejected brochure for shop {}: {}", shop_name, reason),
            Ok(_) => {}
        }
        result
    }

    /// Extract one brochure with an explicit extraction time
    pub fn extract_at(
        &self,
        fragment: ElementRef<'_>,
        shop_name: &str,
        parsed_at: NaiveDateTime,
    ) -> Result<BrochureRecord, Rejection> {
        if self.locator.is_stale(fragment) {
            return Err(Rejection::Stale);
        }

        let title = self
            .locator
            .title(fragment)
            .filter(|t| !t.is_empty())
            .ok_or(Rejection::MissingTitle)?;

        let raw_thumbnail = self
            .locator
            .lazy_thumbnail(fragment)
            .or_else(|| self.locator.fallback_thumbnail(fragment))
            .ok_or(Rejection::MissingThumbnail)?;

        let thumbnail_url = resolve_url(&self.base_url, &raw_thumbnail).map_err(|e| {
            Rejection::InvalidThumbnail {
                url: raw_thumbnail.clone(),
                reason: e.to_string(),
            }
        })?;

        let validity = self
            .locator
            .validity_text(fragment)
            .ok_or(Rejection::MissingValidity)?;

        let (valid_from, valid_to) = parse_date_range(&validity)
            .bounds()
            .ok_or(Rejection::InvalidValidity { text: validity })?;

        Ok(BrochureRecord::new(
            title,
            thumbnail_url,
            shop_name.to_string(),
            valid_from,
            valid_to,
            parsed_at,
        ))
    }
}
