//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use quote_scout::config::Config;
use quote_scout::crawler::{crawl, CrawlEngine, HttpFetcher, PageFetcher, StopReason};
use quote_scout::storage::{store_enriched, QuoteStore, RunStatus, SqliteStorage};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server, with no delay
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.crawler.page_delay_ms = 0;
    config.crawler.request_timeout_secs = Some(5);
    config
}

fn quote_block(text: &str, author: &str, slug: &str) -> String {
    format!(
        r#"<div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
            <span class="text" itemprop="text">{}</span>
            <span>by <small class="author" itemprop="author">{}</small>
            <a href="/author/{}">(about)</a>
            </span>
            <div class="tags">Tags: <a class="tag" href="/tag/life/page/1/">life</a></div>
        </div>"#,
        text, author, slug
    )
}

fn listing_page(quotes: &[String], next: Option<&str>) -> String {
    let pager = match next {
        Some(href) => format!(
            r#"<nav><ul class="pager"><li class="next"><a href="{}">Next <span aria-hidden="true">&rarr;</span></a></li></ul></nav>"#,
            href
        ),
        None => String::new(),
    };
    format!(
        r#"<html><head><title>Quotes to Scrape</title></head><body><div class="container"><div class="row"><div class="col-md-8">{}{}</div></div></div></body></html>"#,
        quotes.concat(),
        pager
    )
}

fn author_page(born_date: &str, born_location: &str) -> String {
    format!(
        r#"<html><body><div class="author-details">
            <h3 class="author-title">Someone</h3>
            <p><strong>Born:</strong> <span class="author-born-date">{}</span>
            <span class="author-born-location">{}</span></p>
        </div></body></html>"#,
        born_date, born_location
    )
}

async fn mount_page(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_two_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &[
                quote_block("“quote1”", "Albert Einstein", "Albert-Einstein"),
                quote_block("“quote2”", "J.K. Rowling", "J-K-Rowling"),
            ],
            Some("/page/2/"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &[quote_block("“quote3”", "Jane Austen", "Jane-Austen")],
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let report = crawl(&config).await.expect("Failed to build crawler");

    let texts: Vec<&str> = report.quotes.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(texts, vec!["“quote1”", "“quote2”", "“quote3”"]);
    assert_eq!(report.quotes[1].author, "J.K. Rowling");
    assert_eq!(report.quotes[2].bio_link, "/author/Jane-Austen");
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.stop, StopReason::Exhausted);

    // Exactly two requests, verified again when the server drops
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/1"))
        .and(header("user-agent", "Mozilla Firefox"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &[quote_block("matched", "A", "A")],
            None,
        )))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let engine = CrawlEngine::new(&config, HttpFetcher::new(&config).unwrap()).unwrap();

    let quotes = engine.crawl_all_quotes().await;
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].text, "matched");
}

#[tokio::test]
async fn test_first_page_error_status_yields_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let report = crawl(&config).await.unwrap();

    assert!(report.quotes.is_empty());
    assert_eq!(report.pages_fetched, 0);
    assert!(matches!(report.stop, StopReason::FetchFailed { .. }));
}

#[tokio::test]
async fn test_failure_mid_crawl_returns_earlier_pages() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/page/1",
        listing_page(&[quote_block("kept", "A", "A")], Some("/page/2/")),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let engine = CrawlEngine::new(&config, HttpFetcher::new(&config).unwrap()).unwrap();

    let quotes = engine.crawl_all_quotes().await;
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].text, "kept");
}

#[tokio::test]
async fn test_malformed_quote_on_single_page() {
    let mock_server = MockServer::start().await;

    let broken = r#"<div class="quote"><span class="text">“no author here”</span><a href="/author/x">(about)</a></div>"#;
    mount_page(
        &mock_server,
        "/page/1",
        listing_page(&[broken.to_string()], None),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let report = crawl(&config).await.unwrap();

    assert!(report.quotes.is_empty());
    assert_eq!(report.skipped_records, 1);
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_fetcher_returns_body_verbatim() {
    let mock_server = MockServer::start().await;
    let body = "<html><body>Mock Page</body></html>";
    mount_page(&mock_server, "/raw", body.to_string()).await;

    let config = create_test_config(&mock_server.uri());
    let fetcher = HttpFetcher::new(&config).unwrap();

    let fetched = fetcher
        .fetch(&format!("{}/raw", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(fetched, body);

    let missing = fetcher
        .fetch(&format!("{}/missing", mock_server.uri()))
        .await
        .unwrap_err();
    assert!(missing.url.ends_with("/missing"));
}

#[tokio::test]
async fn test_author_details_lookup() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/author/Albert-Einstein",
        author_page("March 14, 1879", "in Ulm, Germany"),
    )
    .await;
    mount_page(
        &mock_server,
        "/author/Nobody",
        "<html><body></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let engine = CrawlEngine::new(&config, HttpFetcher::new(&config).unwrap()).unwrap();

    let einstein = engine.fetch_author_details("/author/Albert-Einstein").await;
    assert_eq!(einstein.birth_date.as_deref(), Some("March 14, 1879"));
    assert_eq!(einstein.birth_place.as_deref(), Some("in Ulm, Germany"));

    assert!(engine.fetch_author_details("/author/Nobody").await.is_absent());
    // Unmounted path: wiremock answers 404
    assert!(engine.fetch_author_details("/author/Ghost").await.is_absent());
}

#[tokio::test]
async fn test_crawl_enrich_and_store() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/page/1",
        listing_page(
            &[
                quote_block("first", "Albert Einstein", "Albert-Einstein"),
                quote_block("second", "Albert Einstein", "Albert-Einstein"),
                quote_block("third", "Jane Austen", "Jane-Austen"),
            ],
            None,
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/author/Albert-Einstein"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(author_page("March 14, 1879", "in Ulm, Germany")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/author/Jane-Austen",
        author_page("December 16, 1775", "in Steventon Rectory, Hampshire, The United Kingdom"),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let engine = CrawlEngine::new(&config, HttpFetcher::new(&config).unwrap()).unwrap();

    let report = engine.crawl_with_report().await;
    let enriched = engine.enrich_quotes(&report.quotes).await;

    let mut storage = SqliteStorage::new_in_memory().expect("Failed to open storage");
    let run_id = storage.create_run("test-hash").unwrap();
    store_enriched(&mut storage, run_id, &enriched).unwrap();
    storage
        .finish_run(run_id, RunStatus::Completed, enriched.len())
        .unwrap();

    let stored = storage.quotes_for_run(run_id).unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[1].text, "second");
    assert_eq!(stored[1].birth_date.as_deref(), Some("March 14, 1879"));
    assert_eq!(stored[2].birth_date.as_deref(), Some("December 16, 1775"));

    let run = storage.get_latest_run().unwrap().unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.quote_count, 3);
}
