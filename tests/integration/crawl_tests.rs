//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use mailhost_harvest::config::Config;
use mailhost_harvest::crawler::Coordinator;
use mailhost_harvest::output::StopReason;
use mailhost_harvest::state::{Outcome, PageState};
use mailhost_harvest::HarvestError;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

/// Creates a test configuration seeded with `seed` and saving to `store`
fn create_test_config(seed: &str, store: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.seeds = vec![seed.to_string()];
    config.output.store_path = store.display().to_string();
    config.http.request_timeout_secs = 2;
    config
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

async fn mount_page(
    server: &MockServer,
    route: &str,
    body: &str,
    expected_hits: impl Into<Times>,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn read_store(store: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(store).expect("store should exist");
    serde_json::from_str(&content).expect("store should be a JSON array")
}

#[tokio::test]
async fn test_crawl_harvests_domains_and_filters_public_providers() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/a">A</a> contact: foo@bar.test"#,
        1,
    )
    .await;
    mount_page(&server, "/a", r#"<a href="/">home</a> other@gmail.com"#, 1).await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let config = create_test_config(&format!("{}/", base), &store);

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    let frontier = coordinator.frontier();
    assert_eq!(
        frontier.outcome(&format!("{}/", base)),
        Some(&Outcome::Ok)
    );
    assert_eq!(
        frontier.outcome(&format!("{}/a", base)),
        Some(&Outcome::Ok)
    );
    assert_eq!(frontier.resolved().count(), 2);

    assert!(coordinator.domains().contains("bar.test"));
    assert!(!coordinator.domains().contains("gmail.com"));

    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(report.pages_ok, 2);
    assert_eq!(report.new_domains, 1);
    assert_eq!(read_store(&store), vec!["bar.test"]);
}

#[tokio::test]
async fn test_timeout_is_recorded_and_crawl_continues() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/slow">slow</a> <a href="/fast">fast</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page("late@slow.test").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    mount_page(&server, "/fast", "hello@fast.test", 1).await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let mut config = create_test_config(&format!("{}/", base), &store);
    config.http.request_timeout_secs = 1;

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    let frontier = coordinator.frontier();
    assert_eq!(
        frontier.state(&format!("{}/slow", base)),
        PageState::FetchError
    );
    assert_eq!(
        frontier.outcome(&format!("{}/fast", base)),
        Some(&Outcome::Ok)
    );
    assert_eq!(report.fetch_errors, 1);
    assert_eq!(read_store(&store), vec!["fast.test"]);
}

#[tokio::test]
async fn test_http_error_status_is_fetch_error() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/missing">gone</a> <a href="/ok">ok</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", "", 1).await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let mut coordinator =
        Coordinator::new(create_test_config(&format!("{}/", base), &store)).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(
        coordinator.frontier().outcome(&format!("{}/missing", base)),
        Some(&Outcome::fetch_error("HTTP 404"))
    );
    assert_eq!(report.pages_ok, 2);
    assert_eq!(report.fetch_errors, 1);
}

#[tokio::test]
async fn test_page_ceiling_stops_crawl_and_still_saves() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/1">1</a> <a href="/2">2</a> <a href="/3">3</a>
           <a href="/4">4</a> <a href="/5">5</a> boss@first.test"#,
        1,
    )
    .await;
    for i in 1..=5 {
        mount_page(&server, &format!("/{}", i), "x@later.test", 0).await;
    }

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let mut config = create_test_config(&format!("{}/", base), &store);
    config.crawler.max_pages = 1;

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.stop_reason, StopReason::PageCeiling);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.frontier_remaining, 5);
    assert_eq!(coordinator.frontier().resolved().count(), 1);
    assert_eq!(read_store(&store), vec!["first.test"]);
}

#[tokio::test]
async fn test_page_ceiling_is_not_overshot_with_concurrency() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: String = (1..=8)
        .map(|i| format!(r#"<a href="/{}">{}</a> "#, i, i))
        .collect();
    mount_page(&server, "/", &links, 1).await;
    for i in 1..=8 {
        mount_page(&server, &format!("/{}", i), "", 0..=1).await;
    }

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let mut config = create_test_config(&format!("{}/", base), &store);
    config.crawler.max_pages = 3;
    config.crawler.max_concurrent_fetches = 4;

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.stop_reason, StopReason::PageCeiling);
    assert_eq!(report.frontier_remaining, 6);
}

#[tokio::test]
async fn test_static_resource_links_are_never_fetched() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/file.pdf">pdf</a> <a href="/img/Logo.PNG">logo</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/file.pdf", "", 0).await;
    mount_page(&server, "/img/Logo.PNG", "", 0).await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let mut coordinator =
        Coordinator::new(create_test_config(&format!("{}/", base), &store)).unwrap();
    coordinator.run().await.unwrap();

    assert_eq!(
        coordinator.frontier().state(&format!("{}/file.pdf", base)),
        PageState::Unseen
    );
}

#[tokio::test]
async fn test_off_origin_links_are_never_fetched() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &format!(r#"<a href="{}/elsewhere">other host</a>"#, other.uri()),
        1,
    )
    .await;
    mount_page(&other, "/elsewhere", "", 0).await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let mut coordinator =
        Coordinator::new(create_test_config(&format!("{}/", base), &store)).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_ok, 1);
    assert_eq!(report.urls_queued, 1);
}

#[tokio::test]
async fn test_each_url_fetched_once_despite_fragments_and_cycles() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r##"<a href="/a#top">a</a> <a href="/a#bottom">a again</a> <a href="/b">b</a>"##,
        1,
    )
    .await;
    mount_page(&server, "/a", r#"<a href="/b">b</a> <a href="/#x">home</a>"#, 1).await;
    mount_page(&server, "/b", r#"<a href="/a">a</a> <a href="/">home</a>"#, 1).await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let mut config = create_test_config(&format!("{}/", base), &store);
    config.crawler.max_concurrent_fetches = 3;

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_ok, 3);
    assert_eq!(report.urls_queued, 3);
    // wiremock verifies the single hit per path when the server drops
}

#[tokio::test]
async fn test_parse_error_drops_page_links_and_domains() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/broken">broken</a>"#, 1).await;

    let mut body = br#"<html><a href="/hidden">h</a> lost@hidden.test "#.to_vec();
    body.extend_from_slice(&[0xff, 0xfe, 0xfd]);
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/hidden", "", 0).await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let mut coordinator =
        Coordinator::new(create_test_config(&format!("{}/", base), &store)).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(
        coordinator.frontier().state(&format!("{}/broken", base)),
        PageState::ParseError
    );
    assert_eq!(report.parse_errors, 1);
    assert_eq!(report.pages_fetched, 2);
    assert!(read_store(&store).is_empty());
}

#[tokio::test]
async fn test_existing_store_is_merged_and_denylist_enforced() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", "new@mid.test and also me@hotmail.com", 1).await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    std::fs::write(&store, r#"["zeta.test", "gmail.com", "alpha.test"]"#).unwrap();

    let mut coordinator =
        Coordinator::new(create_test_config(&format!("{}/", base), &store)).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.new_domains, 1);
    assert_eq!(report.total_domains, 3);
    assert_eq!(
        std::fs::read_to_string(&store).unwrap(),
        "[\n  \"alpha.test\",\n  \"mid.test\",\n  \"zeta.test\"\n]"
    );
}

#[tokio::test]
async fn test_malformed_store_aborts_before_any_request() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", "", 0).await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    std::fs::write(&store, "[\"unterminated").unwrap();

    let result = Coordinator::new(create_test_config(&format!("{}/", base), &store));
    assert!(matches!(result, Err(HarvestError::Store(_))));
    assert_eq!(
        std::fs::read_to_string(&store).unwrap(),
        "[\"unterminated"
    );
}

#[tokio::test]
async fn test_unreachable_seed_does_not_abort() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let config = create_test_config("http://127.0.0.1:1/", &store);

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.fetch_errors, 1);
    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(
        coordinator.frontier().state("http://127.0.0.1:1/"),
        PageState::FetchError
    );
    assert!(read_store(&store).is_empty());
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    use wiremock::matchers::header;

    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "HarvestTest/2.0"))
        .respond_with(html_page("ua@agent.test"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = dir.path().join("dominios.json");
    let mut config = create_test_config(&format!("{}/", base), &store);
    config.http.user_agent = "HarvestTest/2.0".to_string();

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_ok, 1);
    assert_eq!(read_store(&store), vec!["agent.test"]);
}
