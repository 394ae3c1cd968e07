//! End-to-end runs against a local HTTP server.
//!
//! `wiremock` serves a catalog page and shop pages shaped like the live site;
//! unmounted paths answer 404, which stands in for a failing shop.

use std::time::Duration;

use chrono::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brochure_scrape::output::load_json;
use brochure_scrape::{BrochureScraper, FetchError, HttpFetcher, PageFetcher, ScraperConfig};

fn catalog_html(shops: &[(&str, &str)]) -> String {
    let items = shops
        .iter()
        .map(|(href, name)| format!("<li><a href=\"{href}\">{name}</a></li>"))
        .collect::<String>();
    format!(
        "<html><body><ul class=\"list-unstyled categories\">{items}</ul></body></html>"
    )
}

fn brochure_html(title: &str, image: &str, validity: &str) -> String {
    format!(
        r#"<div class="brochure-thumb">
             <a href="/x/"><img class="lazyloadBrochure" src="/img/blank.gif" data-src="{image}"></a>
             <p class="grid-item-content"><strong>{title}</strong>
               <small class="hidden-sm">{validity}</small></p>
           </div>"#
    )
}

fn shop_html(brochures: &[String]) -> String {
    format!(
        "<html><body><div class=\"row\">{}</div></body></html>",
        brochures.concat()
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

fn config(server: &MockServer, output: &std::path::Path) -> ScraperConfig {
    ScraperConfig::new(&server.uri())
        .with_request_delay(Duration::ZERO)
        .with_output_file(output)
}

#[tokio::test]
async fn run_and_save_collects_in_catalog_order_and_skips_failing_shops() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/hypermarkte/",
        catalog_html(&[("/kaufland/", "Kaufland"), ("/globus/", "Globus"), ("/real/", "Real")]),
    )
    .await;
    mount_page(
        &server,
        "/kaufland/",
        shop_html(&[
            brochure_html("Wochenangebote", "/img/k1.jpg", "01.03.2024 - 07.03.2024"),
            brochure_html("Grillsaison", "https://cdn.example.com/k2.jpg", "04.03. - 16.03. 2024"),
        ]),
    )
    .await;
    // /globus/ is not mounted and answers 404
    mount_page(
        &server,
        "/real/",
        shop_html(&[
            brochure_html("Größte Auswahl", "/img/r1.jpg", "11.03.2024 - 17.03.2024"),
            brochure_html("Ohne Datum", "/img/r2.jpg", "bald verfügbar"),
        ]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("brochures.json");
    let scraper = BrochureScraper::new(config(&server, &output)).unwrap();

    let records = scraper.run_and_save().await;

    let titles = records.iter().map(|r| r.title.as_str()).collect::<Vec<_>>();
    assert_eq!(titles, vec!["Wochenangebote", "Grillsaison", "Größte Auswahl"]);
    assert_eq!(
        records[0].thumbnail_url.as_str(),
        format!("{}/img/k1.jpg", server.uri())
    );
    assert_eq!(records[1].thumbnail_url.as_str(), "https://cdn.example.com/k2.jpg");
    assert_eq!(records[1].valid_from, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    assert_eq!(records[2].shop_name, "Real");

    let saved = load_json(&output).unwrap();
    assert_eq!(saved, records);
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("Größte Auswahl"));
}

#[tokio::test]
async fn run_and_save_writes_empty_array_when_catalog_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hypermarkte/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("brochures.json");
    let scraper = BrochureScraper::new(config(&server, &output)).unwrap();

    assert!(scraper.run_and_save().await.is_empty());
    assert!(load_json(&output).unwrap().is_empty());
}

#[tokio::test]
async fn run_and_save_returns_records_when_output_cannot_be_written() {
    let server = MockServer::start().await;
    mount_page(&server, "/hypermarkte/", catalog_html(&[("/lidl/", "Lidl")])).await;
    mount_page(
        &server,
        "/lidl/",
        shop_html(&[brochure_html("Lidl Angebote", "/img/l.jpg", "01.03.2024 - 02.03.2024")]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("no-such-dir").join("brochures.json");
    let scraper = BrochureScraper::new(config(&server, &output)).unwrap();

    let records = scraper.run_and_save().await;
    assert_eq!(records.len(), 1);
    assert!(!output.exists());
}

#[tokio::test]
async fn http_fetcher_sends_browser_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hypermarkte/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ScraperConfig::new(&server.uri());
    let fetcher = HttpFetcher::new(&config).unwrap();
    let url = url::Url::parse(&format!("{}/hypermarkte/", server.uri())).unwrap();

    let body = fetcher.fetch_page(&url).await.unwrap();
    assert_eq!(body, "<html></html>");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let header_value = |name: &str| {
        requests[0]
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    assert_eq!(
        header_value("accept-language").as_deref(),
        Some("en-US,en;q=0.9")
    );
    assert_eq!(
        header_value("user-agent").as_deref(),
        Some(config.user_agent.as_str())
    );
}

#[tokio::test]
async fn http_fetcher_reports_non_success_status() {
    let server = MockServer::start().await;
    let config = ScraperConfig::new(&server.uri());
    let fetcher = HttpFetcher::new(&config).unwrap();
    let url = url::Url::parse(&format!("{}/missing/", server.uri())).unwrap();

    let err = fetcher.fetch_page(&url).await.unwrap_err();
    assert!(
        matches!(err, FetchError::UnexpectedStatus { status: 404, .. }),
        "expected 404, got: {err:?}"
    );
}
