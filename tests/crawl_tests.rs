//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full crawl cycle end-to-end: breadth-first traversal, domain scoping,
//! failure tolerance, cancellation, and document output.

use sitefold::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use sitefold::crawler::{crawl, Crawler, HttpFetcher};
use sitefold::output::write_document;
use sitefold::url::CrawlScope;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "sitefold-test".to_string(),
        crawler_version: "0.3".to_string(),
        contact_url: "https://example.test/contact".to_string(),
        contact_email: "test@example.test".to_string(),
    }
}

fn crawler_config(seed: &str, max_pages: Option<usize>) -> CrawlerConfig {
    CrawlerConfig {
        seed_url: seed.to_string(),
        max_pages,
        scope: CrawlScope::Domain,
        root_domain_override: None,
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_raw(
            format!("<html><body>{}</body></html>", body).into_bytes(),
            "text/html",
        )
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

async fn run_crawl(seed: &str, max_pages: Option<usize>) -> sitefold::crawler::CrawlReport {
    let fetcher = HttpFetcher::new(&user_agent()).expect("Failed to build fetcher");
    let crawler =
        Crawler::new(&crawler_config(seed, max_pages), fetcher).expect("Failed to build crawler");
    crawler.run().await
}

#[tokio::test]
async fn test_full_crawl_visits_breadth_first() {
    let server = MockServer::start().await;

    // Seed links A then B; A links C. BFS order: /, /a, /b, /c.
    mount_page(
        &server,
        "/",
        r#"<p>home</p><a href="/a">A</a><a href="/b">B</a>"#,
    )
    .await;
    mount_page(&server, "/a", r#"<p>page a</p><a href="/c">C</a>"#).await;
    mount_page(&server, "/b", "<p>page b</p>").await;
    mount_page(&server, "/c", "<p>page c</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;

    let order: Vec<String> = report.visited.iter().map(|u| u.path().to_string()).collect();
    assert_eq!(order, vec!["/", "/a", "/b", "/c"]);
    assert_eq!(report.document.sections().len(), 4);
    assert_eq!(report.fetch_failures, 0);
}

#[tokio::test]
async fn test_aggregation_order_and_section_format() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<p>first page</p><a href="/next">N</a>"#).await;
    mount_page(&server, "/next", "<p>second page</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;

    let rendered = report.document.render();
    let expected = format!(
        "## {base}/\nfirst page\n\n## {base}/next\nsecond page\n",
        base = server.uri()
    );
    assert_eq!(rendered, expected);
}

#[tokio::test]
async fn test_external_host_never_fetched() {
    let server = MockServer::start().await;
    let external = MockServer::start().await;

    // The external server must never receive a request
    Mock::given(method("GET"))
        .respond_with(html_page("<p>external</p>"))
        .expect(0)
        .mount(&external)
        .await;

    mount_page(
        &server,
        "/",
        &format!(
            r#"<p>home</p><a href="/about">About</a><a href="{}/x">Away</a>"#,
            external.uri()
        ),
    )
    .await;
    mount_page(&server, "/about", "<p>about us</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;

    assert_eq!(report.visited.len(), 2);
    // expect(0) on the external mock is verified when it drops
}

#[tokio::test]
async fn test_transport_failure_does_not_abort_crawl() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>home</p><a href="/broken">B</a><a href="/fine">F</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/fine", "<p>still here</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;

    assert_eq!(report.visited.len(), 3);
    assert_eq!(report.fetch_failures, 1);
    assert_eq!(report.document.sections().len(), 2);
}

#[tokio::test]
async fn test_non_html_content_is_skipped_with_warning() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>home</p><a href="/report.pdf">PDF</a><a href="/page">P</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46])
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/page", "<p>regular page</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;

    assert_eq!(report.visited.len(), 3);
    assert_eq!(report.empty_pages, 1);
    assert_eq!(report.document.sections().len(), 2);
}

#[tokio::test]
async fn test_page_without_text_yields_no_section_but_links_followed() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<p>home</p><a href="/hub">Hub</a>"#).await;
    // Hub has links but no text content of its own
    mount_page(&server, "/hub", r#"<a href="/leaf">Leaf</a>"#).await;
    mount_page(&server, "/leaf", "<p>leaf text</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;

    assert_eq!(report.visited.len(), 3);
    assert_eq!(report.document.sections().len(), 2);
    assert!(report
        .document
        .sections()
        .iter()
        .all(|s| s.url.path() != "/hub"));
}

#[tokio::test]
async fn test_max_pages_cancels_after_cap() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>home</p><a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#,
    )
    .await;
    mount_page(&server, "/a", "<p>a</p>").await;
    mount_page(&server, "/b", "<p>b</p>").await;
    mount_page(&server, "/c", "<p>c</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), Some(2)).await;

    // Exactly the sections aggregated before cancellation, nothing partial
    assert_eq!(report.visited.len(), 2);
    assert_eq!(report.document.sections().len(), 2);
    let order: Vec<&str> = report.visited.iter().map(|u| u.path()).collect();
    assert_eq!(order, vec!["/", "/a"]);
}

#[tokio::test]
async fn test_cyclic_links_terminate() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<p>home</p><a href="/loop">L</a>"#).await;
    mount_page(
        &server,
        "/loop",
        r#"<p>loop</p><a href="/">Home</a><a href="/loop">Self</a>"#,
    )
    .await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;

    assert_eq!(report.visited.len(), 2);
}

#[tokio::test]
async fn test_malformed_hrefs_are_skipped_silently() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r##"<p>home</p>
           <a href="javascript:void(0)">JS</a>
           <a href="mailto:x@example.test">Mail</a>
           <a href="#anchor">Anchor</a>
           <a href="/real">Real</a>"##,
    )
    .await;
    mount_page(&server, "/real", "<p>real page</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;

    assert_eq!(report.visited.len(), 2);
    assert_eq!(report.fetch_failures, 0);
}

#[tokio::test]
async fn test_trivially_different_spellings_visit_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>home</p><a href="/page">One</a><a href="/page/">Two</a><a href="/page#frag">Three</a>"#,
    )
    .await;
    mount_page(&server, "/page", "<p>the page</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;

    assert_eq!(report.visited.len(), 2);
}

#[tokio::test]
async fn test_document_written_to_file() {
    let server = MockServer::start().await;

    mount_page(&server, "/", "<p>only page</p>").await;

    let report = run_crawl(&format!("{}/", server.uri()), None).await;
    assert!(!report.document.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("site.md");
    write_document(&report.document, &out_path).unwrap();

    let written = std::fs::read_to_string(&out_path).unwrap();
    assert!(written.starts_with(&format!("## {}/\n", server.uri())));
    assert!(written.contains("only page"));
}

#[tokio::test]
async fn test_crawl_of_unreachable_seed_finishes_with_empty_document() {
    // Nothing is listening on this port once the server drops
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());
    drop(server);

    let report = run_crawl(&seed, None).await;

    assert_eq!(report.visited.len(), 1);
    assert_eq!(report.fetch_failures, 1);
    assert!(report.document.is_empty());
}

#[tokio::test]
async fn test_crawl_helper_runs_from_full_config() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<p>home</p><a href="/next">N</a>"#).await;
    mount_page(&server, "/next", "<p>next page</p>").await;

    let config = Config {
        crawler: crawler_config(&format!("{}/", server.uri()), None),
        user_agent: user_agent(),
        output: OutputConfig {
            document_path: "./site.md".to_string(),
        },
    };

    let report = crawl(&config).await.unwrap();

    assert_eq!(report.visited.len(), 2);
    assert_eq!(report.document.sections().len(), 2);
}

#[tokio::test]
async fn test_seed_prefix_scope_limits_paths() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/docs",
        r#"<p>docs home</p><a href="/docs/setup">S</a><a href="/blog">B</a>"#,
    )
    .await;
    mount_page(&server, "/docs/setup", "<p>setup</p>").await;
    mount_page(&server, "/blog", "<p>blog</p>").await;

    let fetcher = HttpFetcher::new(&user_agent()).expect("Failed to build fetcher");
    let config = CrawlerConfig {
        seed_url: format!("{}/docs", server.uri()),
        max_pages: None,
        scope: CrawlScope::SeedPrefix,
        root_domain_override: None,
    };
    let crawler = Crawler::new(&config, fetcher).expect("Failed to build crawler");
    let report = crawler.run().await;

    let order: Vec<&str> = report.visited.iter().map(|u| u.path()).collect();
    assert_eq!(order, vec!["/docs", "/docs/setup"]);
}
