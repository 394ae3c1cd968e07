use crate::results::ShopEntry;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Named structural queries over a brochure site's markup.
///
/// Everything that depends on the target site's layout goes through this
/// trait, so a layout change means touching one implementation.
pub trait MarkupLocator {
    /// Links inside the shop category listing, or `None` if the listing is missing
    fn catalog_links(&self, doc: &Html) -> Option<Vec<ShopEntry>>;

    /// Every brochure block on a shop page, in document order
    fn brochure_fragments<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>>;

    /// Whether the brochure is marked as expired
    fn is_stale(&self, fragment: ElementRef<'_>) -> bool;

    /// Trimmed title text, if a title element exists
    fn title(&self, fragment: ElementRef<'_>) -> Option<String>;

    /// Image URL from the lazy-load attribute of the brochure image
    fn lazy_thumbnail(&self, fragment: ElementRef<'_>) -> Option<String>;

    /// Image URL from the first image's `src`, then its lazy-load attribute
    fn fallback_thumbnail(&self, fragment: ElementRef<'_>) -> Option<String>;

    /// Trimmed text of the validity element
    fn validity_text(&self, fragment: ElementRef<'_>) -> Option<String>;
}

macro_rules! selector {
    ($name:ident, $css:literal) => {
        static $name: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse($css).expect(concat!("invalid selector: ", $css)));
    };
}

selector!(CATEGORIES, "ul.list-unstyled.categories");
selector!(LINK, "a");
selector!(BROCHURE, "div.brochure-thumb");
selector!(STALE, "div.grid-item-old");
selector!(TITLE, "strong");
selector!(LAZY_IMAGE, "img.lazyloadBrochure");
selector!(IMAGE, "img");
selector!(VALIDITY, "small.visible-sm");
selector!(VALIDITY_ALT, "small.hidden-sm");

const LAZY_SRC: &str = "data-src";

/// Layout of prospektmaschine.de
#[derive(Debug, Clone, Copy, Default)]
pub struct ProspektLocator;

impl MarkupLocator for ProspektLocator {
    fn catalog_links(&self, doc: &Html) -> Option<Vec<ShopEntry>> {
        let categories = doc.select(&CATEGORIES).next()?;

        let links = categories
            .select(&LINK)
            .filter_map(|link| match link.value().attr("href") {
                Some(href) => Some(ShopEntry::new(href, element_text(link))),
                None => {
                    ::log::debug!("Skipping catalog link without href: {}", element_text(link));
                    None
                }
            })
            .collect::<Vec<_>>();

        ::log::debug!("Catalog listing holds {} links", links.len());
        Some(links)
    }

    fn brochure_fragments<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        doc.select(&BROCHURE).collect()
    }

    fn is_stale(&self, fragment: ElementRef<'_>) -> bool {
        fragment.select(&STALE).next().is_some()
    }

    fn title(&self, fragment: ElementRef<'_>) -> Option<String> {
        fragment.select(&TITLE).next().map(element_text)
    }

    fn lazy_thumbnail(&self, fragment: ElementRef<'_>) -> Option<String> {
        let img = fragment.select(&LAZY_IMAGE).next()?;
        non_empty_attr(img, LAZY_SRC)
    }

    fn fallback_thumbnail(&self, fragment: ElementRef<'_>) -> Option<String> {
        let img = fragment.select(&IMAGE).next()?;
        non_empty_attr(img, "src").or_else(|| non_empty_attr(img, LAZY_SRC))
    }

    fn validity_text(&self, fragment: ElementRef<'_>) -> Option<String> {
        fragment
            .select(&VALIDITY)
            .next()
            .or_else(|| fragment.select(&VALIDITY_ALT).next())
            .map(element_text)
    }
}

/// Concatenated text of an element, trimmed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn non_empty_attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
