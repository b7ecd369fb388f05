//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the storefront and run the
//! pagination walk, batched scraping and dataset writing end-to-end.

use alinino_scraper::config::{Config, HttpConfig, OutputConfig, ScraperConfig};
use alinino_scraper::crawler::{
    build_http_client, BatchOrchestrator, ConcurrencyGate, Coordinator, Fetcher, PaginationWalker,
};
use alinino_scraper::output::{read_dataset, WriteOutcome};
use alinino_scraper::BookRecord;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COLLECTION_PATH: &str = "/collection/bestsellery";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, dataset_path: &str) -> Config {
    let mut scraper = ScraperConfig::new(format!("{}{}", base_url, COLLECTION_PATH));
    scraper.max_concurrent = 3;
    scraper.batch_size = 2;
    scraper.batch_delay_ms = 10;
    scraper.request_timeout_secs = 1;

    Config {
        scraper,
        http: HttpConfig::default(),
        output: OutputConfig {
            dataset_path: dataset_path.to_string(),
        },
    }
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html")
}

fn listing_page(slugs: &[&str]) -> String {
    let cards: String = slugs
        .iter()
        .enumerate()
        .map(|(id, slug)| {
            format!(
                r#"<form data-product-id="{id}" class="product-card">
                     <a class="product-card__title" href="/product/{slug}">{slug}</a>
                   </form>"#
            )
        })
        .collect();
    format!("<html><body><div class=\"products\">{cards}</div></body></html>")
}

fn detail_page(title: &str, price: &str) -> String {
    format!(
        r#"<html><body>
             <h1 class="product__title">{title}</h1>
             <div class="product__price">{price}</div>
             <form data-main-form="true"><div class="labels">
               <span class="labels__item" data-label-title="Bestseller">Bestseller</span>
             </div></form>
             <span class="rating__count">3 rəy</span>
           </body></html>"#
    )
}

async fn mount_listing(server: &MockServer, page: Option<&str>, slugs: &[&str], calls: u64) {
    let mock = Mock::given(method("GET")).and(path(COLLECTION_PATH));
    let mock = match page {
        Some(page) => mock.and(query_param("page", page)),
        None => mock,
    };
    mock.respond_with(html(listing_page(slugs)))
        .expect(calls)
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, slug: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/product/{}", slug)))
        .respond_with(response)
        .mount(server)
        .await;
}

fn fetcher(capacity: usize) -> Fetcher {
    let client = build_http_client(&HttpConfig::default(), Duration::from_secs(1))
        .expect("Failed to build client");
    Fetcher::new(client, ConcurrencyGate::new(capacity))
}

#[tokio::test]
async fn test_full_crawl_with_partial_failures() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    // Query-specific pages first so they take precedence over page 1
    mount_listing(&server, Some("2"), &["dord", "bes"], 1).await;
    mount_listing(&server, Some("3"), &[], 1).await;
    mount_listing(&server, None, &["bir", "iki", "uc"], 1).await;

    mount_detail(&server, "bir", html(detail_page("Bir", "10,00 AZN"))).await;
    mount_detail(&server, "iki", html(detail_page("İki", "12,50 AZN"))).await;
    // 500 without a body cannot be parsed
    mount_detail(&server, "uc", ResponseTemplate::new(500)).await;
    mount_detail(
        &server,
        "dord",
        html(detail_page("Dörd", "1 200,00 AZN")).set_delay(Duration::from_secs(3)),
    )
    .await;
    mount_detail(&server, "bes", html(detail_page("Beş", "7 AZN"))).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let dataset_path = dir.path().join("books.csv");
    let config = create_test_config(&base_url, dataset_path.to_str().unwrap());

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.pages_requested, 3);
    assert_eq!(report.links_found, 5);
    assert_eq!(report.records_scraped, 3);
    assert_eq!(report.failed, 2);
    assert_eq!(report.batches, 3);
    assert_eq!(
        report.dataset,
        Some(WriteOutcome::Written {
            rows: 3,
            path: dataset_path.clone()
        })
    );

    let books = read_dataset(&dataset_path).expect("Failed to read dataset");
    let titles: HashSet<_> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, HashSet::from(["Bir", "İki", "Beş"]));

    let bir = books.iter().find(|b| b.title == "Bir").unwrap();
    assert_eq!(bir.url, format!("{}/product/bir", base_url));
    assert_eq!(bir.current_price_numeric, "10.00");
    assert_eq!(bir.labels, "Bestseller");
    assert_eq!(bir.reviews_count, "3");
}

#[tokio::test]
async fn test_pagination_stops_on_empty_page() {
    let server = MockServer::start().await;

    mount_listing(&server, Some("2"), &[], 1).await;
    mount_listing(&server, Some("3"), &["never"], 0).await;
    mount_listing(&server, None, &["bir", "iki"], 1).await;

    let collection = Url::parse(&format!("{}{}", server.uri(), COLLECTION_PATH)).unwrap();
    let outcome = PaginationWalker::new(fetcher(2))
        .walk(&collection, None)
        .await;

    assert_eq!(outcome.pages_requested, 2);
    assert_eq!(
        outcome.links,
        vec![
            format!("{}/product/bir", server.uri()),
            format!("{}/product/iki", server.uri()),
        ]
    );
    // Dropping the server verifies page 3 was never requested
}

#[tokio::test]
async fn test_pagination_respects_page_limit() {
    let server = MockServer::start().await;

    mount_listing(&server, Some("2"), &["uc"], 0).await;
    mount_listing(&server, None, &["bir", "iki"], 1).await;

    let collection = Url::parse(&format!("{}{}", server.uri(), COLLECTION_PATH)).unwrap();
    let outcome = PaginationWalker::new(fetcher(2))
        .walk(&collection, Some(1))
        .await;

    assert_eq!(outcome.pages_requested, 1);
    assert_eq!(outcome.links.len(), 2);
}

#[tokio::test]
async fn test_pagination_stops_on_listing_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    mount_listing(&server, None, &["bir"], 1).await;

    let collection = Url::parse(&format!("{}{}", server.uri(), COLLECTION_PATH)).unwrap();
    let outcome = PaginationWalker::new(fetcher(2))
        .walk(&collection, None)
        .await;

    assert_eq!(outcome.pages_requested, 2);
    assert_eq!(outcome.links, vec![format!("{}/product/bir", server.uri())]);
}

#[tokio::test]
async fn test_batch_output_excludes_failures() {
    let server = MockServer::start().await;

    let good = ["a", "b", "c", "d"];
    for slug in good {
        mount_detail(&server, slug, html(detail_page(slug, "5 AZN"))).await;
    }
    mount_detail(&server, "broken", ResponseTemplate::new(500)).await;
    mount_detail(
        &server,
        "slow",
        html(detail_page("slow", "5 AZN")).set_delay(Duration::from_secs(3)),
    )
    .await;

    let links: Vec<String> = ["a", "broken", "b", "c", "slow", "d"]
        .iter()
        .map(|slug| format!("{}/product/{}", server.uri(), slug))
        .collect();

    let orchestrator = BatchOrchestrator::new(fetcher(3), 4, Duration::from_millis(10));
    let outcome = orchestrator.run(&links).await;

    assert_eq!(outcome.records.len(), links.len() - 2);
    assert_eq!(outcome.failed, 2);
    assert_eq!(outcome.batches, 2);

    let input: HashSet<&str> = links.iter().map(String::as_str).collect();
    for record in &outcome.records {
        assert!(input.contains(record.url.as_str()));
    }

    let scraped: HashSet<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(scraped, HashSet::from(good));
}

#[tokio::test]
async fn test_error_status_detail_page_still_yields_record() {
    let server = MockServer::start().await;

    mount_detail(
        &server,
        "gone",
        ResponseTemplate::new(404).set_body_raw(
            detail_page("Kitab tapılmadı", "").into_bytes(),
            "text/html",
        ),
    )
    .await;
    mount_detail(
        &server,
        "down",
        ResponseTemplate::new(500).set_body_raw(
            detail_page("Server xətası", "").into_bytes(),
            "text/html",
        ),
    )
    .await;

    let links: Vec<String> = ["gone", "down"]
        .iter()
        .map(|slug| format!("{}/product/{}", server.uri(), slug))
        .collect();

    let outcome = BatchOrchestrator::new(fetcher(2), 10, Duration::ZERO)
        .run(&links)
        .await;

    assert_eq!(outcome.failed, 0);
    let titles: HashSet<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, HashSet::from(["Kitab tapılmadı", "Server xətası"]));
}

#[tokio::test]
async fn test_batch_records_arrive_in_completion_order() {
    let server = MockServer::start().await;

    mount_detail(
        &server,
        "yavas",
        html(detail_page("Yavaş", "1 AZN")).set_delay(Duration::from_millis(300)),
    )
    .await;
    mount_detail(&server, "tez", html(detail_page("Tez", "1 AZN"))).await;

    let links = vec![
        format!("{}/product/yavas", server.uri()),
        format!("{}/product/tez", server.uri()),
    ];

    let outcome = BatchOrchestrator::new(fetcher(2), 2, Duration::ZERO)
        .run(&links)
        .await;

    let titles: Vec<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Tez", "Yavaş"]);
}

#[tokio::test]
async fn test_gate_caps_concurrency_across_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html(detail_page("slow", "1 AZN")).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let links: Vec<String> = (0..6)
        .map(|i| format!("{}/product/book-{}", server.uri(), i))
        .collect();

    // Six fetches in one batch through two slots run in three waves
    let started = Instant::now();
    let outcome = BatchOrchestrator::new(fetcher(2), 6, Duration::ZERO)
        .run(&links)
        .await;

    assert_eq!(outcome.records.len(), 6);
    assert!(started.elapsed() >= Duration::from_millis(600));
}

#[tokio::test]
async fn test_empty_collection_writes_nothing() {
    let server = MockServer::start().await;
    mount_listing(&server, None, &[], 1).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let dataset_path = dir.path().join("books.csv");
    let config = create_test_config(&server.uri(), dataset_path.to_str().unwrap());

    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.links_found, 0);
    assert_eq!(report.batches, 0);
    assert_eq!(report.dataset, Some(WriteOutcome::NothingToSave));
    assert!(!dataset_path.exists());
}

#[tokio::test]
async fn test_scrape_returns_records_without_writing() {
    let server = MockServer::start().await;
    mount_listing(&server, Some("2"), &[], 1).await;
    mount_listing(&server, None, &["tek"], 1).await;
    mount_detail(&server, "tek", html(detail_page("Tək", "3,30 AZN"))).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let dataset_path = dir.path().join("books.csv");
    let config = create_test_config(&server.uri(), dataset_path.to_str().unwrap());

    let (walk, batches) = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .scrape()
        .await;

    assert_eq!(walk.links.len(), 1);
    let expected = {
        let mut book = BookRecord::new(format!("{}/product/tek", server.uri()));
        book.title = "Tək".to_string();
        book.current_price = "3,30 AZN".to_string();
        book.current_price_numeric = "3.30".to_string();
        book.labels = "Bestseller".to_string();
        book.reviews_count = "3".to_string();
        book
    };
    assert_eq!(batches.records, vec![expected]);
    assert!(!dataset_path.exists());
}
