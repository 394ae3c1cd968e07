use crate::parsers::html::{MarkupLocator, ProspektLocator, element_text};
use crate::results::ShopEntry;
use scraper::Html;

const CATALOG: &str = r#"
<html><body>
  <nav><a href="/impressum/">Impressum</a></nav>
  <ul class="list-unstyled categories">
    <li><a href="/kaufland/">  Kaufland </a></li>
    <li><a>No link</a></li>
    <li><a href="/lidl/">Lidl</a></li>
    <li><a href="https://www.prospektmaschine.de/netto/">Netto</a></li>
  </ul>
</body></html>
"#;

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_catalog_links_in_document_order() {
        let doc = Html::parse_document(CATALOG);
        let links = ProspektLocator.catalog_links(&doc).unwrap();
        assert_eq!(
            links,
            vec![
                ShopEntry::new("/kaufland/", "Kaufland"),
                ShopEntry::new("/lidl/", "Lidl"),
                ShopEntry::new("https://www.prospektmaschine.de/netto/", "Netto"),
            ]
        );
    }

    #[test]
    fn test_missing_category_listing() {
        let doc = Html::parse_document("<ul class=\"list-unstyled\"><li><a href=\"/x/\">X</a></li></ul>");
        assert_eq!(ProspektLocator.catalog_links(&doc), None);
    }

    #[test]
    fn test_empty_category_listing() {
        let doc = Html::parse_document("<ul class=\"list-unstyled categories\"></ul>");
        assert_eq!(ProspektLocator.catalog_links(&doc), Some(Vec::new()));
    }
}

#[cfg(test)]
mod shop_page_tests {
    use super::*;

    #[test]
    fn test_brochure_fragments_in_document_order() {
        let doc = Html::parse_document(
            r#"<div class="brochure-thumb"><strong>A</strong></div>
               <div class="other"><strong>skip</strong></div>
               <div class="col"><div class="brochure-thumb"><strong>B</strong></div></div>"#,
        );
        let titles = ProspektLocator
            .brochure_fragments(&doc)
            .into_iter()
            .map(|f| ProspektLocator.title(f).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_element_text_joins_and_trims() {
        let doc = Html::parse_document("<div class=\"brochure-thumb\"><strong>\n Aktion <em>KW 10</em> </strong></div>");
        let fragment = ProspektLocator.brochure_fragments(&doc)[0];
        assert_eq!(ProspektLocator.title(fragment).as_deref(), Some("Aktion KW 10"));
        assert_eq!(element_text(fragment), "Aktion KW 10");
    }
}
