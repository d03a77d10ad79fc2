//! Shared fixtures for the integration tests

use lt24_dump::config::Config;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a config pointing at the mock server with outputs in `dir`
pub fn test_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.account.username = "user".to_string();
    config.crawler.server_url = server.uri();
    config.crawler.request_timeout_secs = 5;
    config.output.output_dir = dir.path().join("tracks");
    config.output.show_progress = false;
    config
}

/// Renders a listing page with one grid box per id
pub fn listing_html(ids: &[&str]) -> String {
    let boxes: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<div class="boxgridSocial" data-trackid="{id}"><a href="/track/{id}">Track {id}</a></div>"#
            )
        })
        .collect();
    format!("<html><head><title>Tracks</title></head><body>{boxes}</body></html>")
}

/// Mounts listing page `page` for `username`, expected to be fetched once
pub async fn mount_listing(server: &MockServer, username: &str, page: u32, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/user/{}/tracks/page_num/{}", username, page)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(ids))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a listing guard that fails the test if any listing page is fetched
pub async fn forbid_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/user/.*/tracks/page_num/\d+$"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// IGC body served for a track
pub fn igc_body(id: &str) -> String {
    format!("AXXX lt24 track {}\nB1200004700000N00800000EA0100001000\n", id)
}

/// Mounts the IGC download for one track
pub async fn mount_track(server: &MockServer, username: &str, id: &str) {
    Mock::given(method("GET"))
        .and(path("/leo_live.php"))
        .and(query_param("op", "igc"))
        .and(query_param("user", username))
        .and(query_param("trackID", id))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(igc_body(id)))
        .mount(server)
        .await;
}

/// Names of the files in `dir`, sorted
pub fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Number of requests the server received for paths starting with `prefix`
pub async fn request_count(server: &MockServer, prefix: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path().starts_with(prefix))
        .count()
}

pub fn cache_path(dir: &TempDir) -> PathBuf {
    dir.path().join("track_ids.yaml")
}
