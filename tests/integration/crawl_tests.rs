//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full mirror cycle end-to-end against a temporary output directory.

use site_mirror::config::{Config, HttpConfig, MirrorConfig};
use site_mirror::crawler::{mirror, HttpFetcher};
use site_mirror::output::CrawlReport;
use site_mirror::storage::FsStore;
use site_mirror::url::LinkStyle;
use site_mirror::{CrawlSession, Crawler, LinkKind, Outcome};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Directory the mock server's files are mirrored into
fn host_dir(mock_server: &MockServer, output: &Path) -> PathBuf {
    let uri = url::Url::parse(&mock_server.uri()).expect("Failed to parse server URI");
    output.join(format!(
        "{}:{}",
        uri.host_str().expect("Failed to extract host"),
        uri.port().expect("Mock server has an explicit port")
    ))
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

async fn run_crawl(start_url: &str, output: &Path, max_depth: u32) -> CrawlReport {
    let fetcher = HttpFetcher::new(&HttpConfig::default()).expect("Failed to build HTTP client");
    let session = CrawlSession::new(start_url, output, max_depth);

    let mut crawler = Crawler::new(fetcher, FsStore::new(), session);
    crawler.run().await;
    let (_, report) = crawler.into_parts();
    report
}

#[tokio::test]
async fn test_full_mirror_two_pages() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><head><title>Home</title><link rel="stylesheet" href="/style.css"></head>
               <body><a href="/about.html">About</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about.html"))
        .respond_with(html(
            r#"<html><body><a href="/">Home</a><img src="img/logo.png"><link href="style.css"></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/style.css"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"body { color: red }".to_vec(), "text/css"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G', 0x00, 0xff], "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let start_url = format!("{}/", mock_server.uri());
    let report = run_crawl(&start_url, output.path(), 2).await;

    let site = host_dir(&mock_server, output.path());
    let index = std::fs::read_to_string(site.join("index.html")).unwrap();
    assert!(index.contains(r#"href="style.css""#));
    assert!(index.contains(r#"href="about.html""#));

    let about = std::fs::read_to_string(site.join("about.html")).unwrap();
    assert!(about.contains(r#"href="index.html""#));
    assert!(about.contains(r#"src="img/logo.png""#));

    assert_eq!(
        std::fs::read(site.join("style.css")).unwrap(),
        b"body { color: red }"
    );
    assert_eq!(
        std::fs::read(site.join("img/logo.png")).unwrap(),
        vec![0x89, b'P', b'N', b'G', 0x00, 0xff]
    );

    assert_eq!(report.pages_saved(), 2);
    assert_eq!(report.resources_saved(), 2);
    assert_eq!(report.entry(&start_url).unwrap().title.as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_depth_limit_respected() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/next.html">Next</a><img src="/pic.png">"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pic.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"png".to_vec(), "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/next.html"))
        .respond_with(html("<p>next</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let start_url = format!("{}/", mock_server.uri());
    run_crawl(&start_url, output.path(), 1).await;

    let site = host_dir(&mock_server, output.path());
    assert!(site.join("index.html").exists());
    assert!(site.join("pic.png").exists());
    assert!(!site.join("next.html").exists());
}

#[tokio::test]
async fn test_failed_resource_reported_and_crawl_continues() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<img src="missing.png"><img src="present.png">"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/present.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"ok".to_vec(), "image/png"))
        .mount(&mock_server)
        .await;

    let start_url = format!("{}/", mock_server.uri());
    let report = run_crawl(&start_url, output.path(), 1).await;

    let site = host_dir(&mock_server, output.path());
    assert!(!site.join("missing.png").exists());
    assert_eq!(std::fs::read(site.join("present.png")).unwrap(), b"ok");

    let missing = report
        .entry(&format!("{}/missing.png", mock_server.uri()))
        .unwrap();
    assert_eq!(missing.kind, LinkKind::Resource);
    assert_eq!(missing.outcome, Outcome::HttpStatus(404));
}

#[tokio::test]
async fn test_redirected_page_resolves_against_final_url() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/docs/"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/"))
        .respond_with(html(r#"<img src="diagram.png">"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/diagram.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"diagram".to_vec(), "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let start_url = format!("{}/docs", mock_server.uri());
    run_crawl(&start_url, output.path(), 1).await;

    let site = host_dir(&mock_server, output.path());
    assert!(site.join("docs/index.html").exists());
    assert_eq!(std::fs::read(site.join("docs/diagram.png")).unwrap(), b"diagram");
}

#[tokio::test]
async fn test_non_html_page_saved_verbatim() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    let body = vec![0x00, 0x01, 0xfe, 0xff, b'<', b'a', b'>'];
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.clone(), "application/octet-stream"))
        .mount(&mock_server)
        .await;

    let start_url = format!("{}/download", mock_server.uri());
    let report = run_crawl(&start_url, output.path(), 1).await;

    let site = host_dir(&mock_server, output.path());
    assert_eq!(std::fs::read(site.join("download/index.html")).unwrap(), body);
    assert_eq!(report.entry(&start_url).unwrap().outcome, Outcome::SavedRaw);
}

#[tokio::test]
async fn test_mirror_from_config() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/guide/">Guide</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/guide/"))
        .respond_with(html(r#"<a href="/">Home</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config {
        mirror: MirrorConfig {
            start_url: Some(format!("{}/", mock_server.uri())),
            output_dir: output.path().join("mirror"),
            max_depth: 3,
            link_style: LinkStyle::OutputRoot,
        },
        http: HttpConfig::default(),
    };

    let report = mirror(&config).await.unwrap();
    assert_eq!(report.pages_saved(), 2);
    assert!(report.finished_at.is_some());

    let site = host_dir(&mock_server, &output.path().join("mirror"));
    let index = std::fs::read_to_string(site.join("index.html")).unwrap();
    // The host directory carries the port; its colon is percent-encoded in hrefs.
    let host = site.file_name().unwrap().to_string_lossy().replace(':', "%3A");
    assert!(index.contains(&format!(r#"href="{}/guide/index.html""#, host)));
    assert!(site.join("guide/index.html").exists());
}

#[tokio::test]
async fn test_mirror_without_start_url_fails() {
    let output = TempDir::new().unwrap();
    let config = Config {
        mirror: MirrorConfig {
            output_dir: output.path().to_path_buf(),
            ..MirrorConfig::default()
        },
        http: HttpConfig::default(),
    };

    assert!(mirror(&config).await.is_err());
}
