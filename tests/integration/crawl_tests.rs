//! Discovery tests: crawl termination, caching and resume

use crate::common::*;
use lt24_dump::config::Config;
use lt24_dump::storage::TrackCache;
use lt24_dump::{run_dump, DoneReason, DumpError, FetchError, TrackId, TrackIdSet};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(raw: &[&str]) -> TrackIdSet {
    raw.iter().map(|r| TrackId::parse(r).unwrap()).collect()
}

#[tokio::test]
async fn test_full_dump_three_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, "user", 1, &["10", "11"]).await;
    mount_listing(&server, "user", 2, &["12"]).await;
    mount_listing(&server, "user", 3, &[]).await;
    for id in ["10", "11", "12"] {
        mount_track(&server, "user", id).await;
    }

    let config = test_config(&server, &dir);
    let output_dir = config.output.output_dir.clone();

    let summary = run_dump(config).await.expect("dump failed");

    assert_eq!(summary.identifiers, 3);
    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.source, DoneReason::EmptyPage);
    assert!(summary.is_complete());
    assert_eq!(request_count(&server, "/user/").await, 3);

    assert_eq!(
        file_names(&output_dir),
        vec!["user_10.igc", "user_11.igc", "user_12.igc"]
    );
    let content = std::fs::read_to_string(output_dir.join("user_11.igc")).unwrap();
    assert_eq!(content, igc_body("11"));
}

#[tokio::test]
async fn test_duplicate_ids_across_pages_download_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, "user", 1, &["1", "2"]).await;
    mount_listing(&server, "user", 2, &["2", "3"]).await;
    mount_listing(&server, "user", 3, &[]).await;
    for id in ["1", "2", "3"] {
        mount_track(&server, "user", id).await;
    }

    let config = test_config(&server, &dir);
    let output_dir = config.output.output_dir.clone();
    let summary = run_dump(config).await.unwrap();

    assert_eq!(summary.identifiers, 3);
    assert_eq!(request_count(&server, "/leo_live.php").await, 3);
    assert_eq!(
        file_names(&output_dir),
        vec!["user_1.igc", "user_2.igc", "user_3.igc"]
    );
}

#[tokio::test]
async fn test_page_with_only_malformed_ids_keeps_crawling() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, "user", 1, &["12.5"]).await;
    mount_listing(&server, "user", 2, &["5"]).await;
    mount_listing(&server, "user", 3, &[]).await;
    mount_track(&server, "user", "5").await;

    let config = test_config(&server, &dir);
    let output_dir = config.output.output_dir.clone();
    let summary = run_dump(config).await.unwrap();

    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.identifiers, 1);
    assert_eq!(file_names(&output_dir), vec!["user_5.igc"]);
}

#[tokio::test]
async fn test_page_limit_stops_crawl() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, "user", 1, &["1"]).await;
    mount_listing(&server, "user", 2, &["2"]).await;
    // Page 3 would be served but must never be requested
    Mock::given(method("GET"))
        .and(path("/user/user/tracks/page_num/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["3"])))
        .expect(0)
        .mount(&server)
        .await;
    mount_track(&server, "user", "1").await;
    mount_track(&server, "user", "2").await;

    let mut config = test_config(&server, &dir);
    config.crawler.max_pages = 2;

    let summary = run_dump(config).await.unwrap();
    assert_eq!(summary.source, DoneReason::PageLimit);
    assert_eq!(summary.identifiers, 2);
}

#[tokio::test]
async fn test_crawl_writes_cache_and_second_run_skips_crawl() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, "user", 1, &["10", "11"]).await;
    mount_listing(&server, "user", 2, &[]).await;
    mount_track(&server, "user", "10").await;
    mount_track(&server, "user", "11").await;

    let mut config = test_config(&server, &dir);
    config.output.track_file = Some(cache_path(&dir));

    let first = run_dump(config.clone()).await.unwrap();
    assert_eq!(first.source, DoneReason::EmptyPage);
    assert_eq!(
        TrackCache::new(cache_path(&dir)).load().unwrap(),
        Some(ids(&["10", "11"]))
    );

    let second = run_dump(config).await.unwrap();
    assert!(second.from_cache());
    assert_eq!(second.pages_fetched, 0);
    assert_eq!(second.identifiers, 2);

    // Listing pages were fetched by the first run only
    assert_eq!(request_count(&server, "/user/").await, 2);
    // Both runs downloaded every track
    assert_eq!(request_count(&server, "/leo_live.php").await, 4);
}

#[tokio::test]
async fn test_cached_ids_without_password_skip_network_crawl() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    std::fs::write(cache_path(&dir), "[\"5\", \"6\"]\n").unwrap();
    forbid_listing(&server).await;
    mount_track(&server, "user", "5").await;
    mount_track(&server, "user", "6").await;

    let mut config = test_config(&server, &dir);
    config.output.track_file = Some(cache_path(&dir));
    let output_dir = config.output.output_dir.clone();

    let summary = run_dump(config).await.unwrap();

    assert!(summary.from_cache());
    assert_eq!(request_count(&server, "/login").await, 0);
    assert_eq!(file_names(&output_dir), vec!["user_5.igc", "user_6.igc"]);
}

#[tokio::test]
async fn test_listing_error_is_fatal_and_leaves_no_cache() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, "user", 1, &["1"]).await;
    Mock::given(method("GET"))
        .and(path("/user/user/tracks/page_num/2"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut config = test_config(&server, &dir);
    config.output.track_file = Some(cache_path(&dir));
    let output_dir = config.output.output_dir.clone();

    let result = run_dump(config).await;

    assert!(matches!(
        result,
        Err(DumpError::Fetch(FetchError::Status { status: 502, .. }))
    ));
    assert!(!cache_path(&dir).exists());
    assert_eq!(request_count(&server, "/leo_live.php").await, 0);
    assert!(file_names(&output_dir).is_empty());
}

#[tokio::test]
async fn test_missing_username_is_config_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let mut config: Config = test_config(&server, &dir);
    config.account.username = String::new();

    let result = run_dump(config).await;
    assert!(matches!(result, Err(DumpError::Config(_))));
    assert_eq!(request_count(&server, "/").await, 0);
}
