//! Two-phase pipeline tests: real extractor and orchestrator, canned
//! documents.

use hestia_client::{CssExtractor, ReqwestFetcher};
use hestia_core::config::CrawlConfig;
use hestia_core::crawl::CrawlService;
use hestia_core::error::AppError;
use hestia_core::report;
use hestia_core::testutil::MockFetcher;
use hestia_core::traits::Fetcher;

const SEARCH_PAGE: &str = r#"<html><body>
  <a id="search-result-entry-header-1" href="/iad/123">
    <h3>Nice flat</h3>
    <span data-testid="search-result-entry-price-1"> € 900 </span>
  </a>
</body></html>"#;

const DETAIL_PAGE: &str = r#"<html><body>
  <span data-testid="ad-detail-ad-edit-date-top-1">Zuletzt geändert: 01.01.2024</span>
</body></html>"#;

/// Test-site substitution: the sample hrefs live under `/iad/` rather
/// than the production detail prefix.
fn test_config() -> CrawlConfig {
    CrawlConfig {
        detail_path: "/iad/".to_string(),
        ..CrawlConfig::default()
    }
}

#[tokio::test]
async fn end_to_end_two_phase_crawl() {
    let config = test_config();
    let fetcher = MockFetcher::with_responses(vec![
        Ok(SEARCH_PAGE.to_string()),
        Ok(DETAIL_PAGE.to_string()),
    ]);
    let extractor = CssExtractor::new(&config).unwrap();

    let store = CrawlService::new(fetcher.clone(), extractor, config)
        .run()
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
    let listing = &store.listings()[0];
    assert_eq!(listing.url, "https://www.willhaben.at/iad/123");
    assert_eq!(listing.title, "Nice flat");
    assert_eq!(listing.price, "€ 900");
    assert_eq!(listing.location, "");
    assert_eq!(listing.seller, "");
    assert_eq!(listing.description, "");
    assert_eq!(listing.posted_date, "01.01.2024");

    let requests = fetcher.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with(
        "https://www.willhaben.at/iad/immobilien/mietwohnungen/mietwohnung-angebote?"
    ));
    assert_eq!(requests[1], "https://www.willhaben.at/iad/123");
}

#[tokio::test]
async fn end_to_end_report_output() {
    let config = test_config();
    let fetcher = MockFetcher::with_responses(vec![
        Ok(SEARCH_PAGE.to_string()),
        Ok(DETAIL_PAGE.to_string()),
    ]);
    let extractor = CssExtractor::new(&config).unwrap();

    let store = CrawlService::new(fetcher, extractor, config)
        .run()
        .await
        .unwrap();

    let mut out = Vec::new();
    report::write_text(&store, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Title: Nice flat\n\
         Price: € 900\n\
         Location: \n\
         Seller: \n\
         URL: https://www.willhaben.at/iad/123\n\
         Description: \n\
         Date: 01.01.2024\n\
         \n"
    );
}

#[tokio::test]
async fn unreachable_search_page_still_completes_with_empty_report() {
    let config = test_config();
    let fetcher = MockFetcher::with_error(AppError::NetworkError("dns failure".into()));
    let extractor = CssExtractor::new(&config).unwrap();

    let store = CrawlService::new(fetcher, extractor, config)
        .run()
        .await
        .unwrap();

    assert!(store.is_empty());
    let mut out = Vec::new();
    report::write_text(&store, &mut out).unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn fetcher_rejects_offsite_url_without_touching_the_network() {
    let fetcher = ReqwestFetcher::new(vec![
        "willhaben.at".to_string(),
        "www.willhaben.at".to_string(),
    ])
    .unwrap();

    let err = fetcher.fetch("https://example.com/x").await.unwrap_err();
    assert!(matches!(err, AppError::DomainNotAllowed(host) if host == "example.com"));
}

#[tokio::test]
async fn offsite_listing_is_kept_but_never_enriched() {
    let config = test_config();
    let search = r#"<a id="search-result-entry-header-1" href="https://example.com/iad/9">
        <h3>Offsite</h3></a>"#;
    let fetcher = MockFetcher::with_responses(vec![
        Ok(search.to_string()),
        Err(AppError::DomainNotAllowed("example.com".into())),
    ]);
    let extractor = CssExtractor::new(&config).unwrap();

    let store = CrawlService::new(fetcher, extractor, config)
        .run()
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.listings()[0].posted_date, "");
}
