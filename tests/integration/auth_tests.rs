//! Login tests against a mock login page

use crate::common::*;
use lt24_dump::{run_dump, AuthError, DumpError};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PAGE: &str = r#"<html><body>
<form id="search" action="/search"><input name="q"></form>
<form action="/login" method="post">
  <input type="hidden" name="token" value="abc123">
  <input type="text" id="user" name="user">
  <input type="password" name="pass">
  <input type="submit" value="Login">
</form>
</body></html>"#;

async fn mount_login_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_PAGE))
        .mount(server)
        .await;
}

fn with_password(config: &mut lt24_dump::Config, password: &str) {
    config.account.password = Some(password.to_string());
}

#[tokio::test]
async fn test_login_then_crawl_with_session_cookie() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string_contains("pass=secret"))
        .and(body_string_contains("token=abc123"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/user/user")
                .insert_header("set-cookie", "sid=s3ss10n; Path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/user"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>home</html>"))
        .mount(&server)
        .await;

    // Listing pages are only served to the logged in session
    Mock::given(method("GET"))
        .and(path("/user/user/tracks/page_num/1"))
        .and(header("cookie", "sid=s3ss10n"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["99"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/user/tracks/page_num/2"))
        .and(header("cookie", "sid=s3ss10n"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&[])))
        .expect(1)
        .mount(&server)
        .await;
    mount_track(&server, "user", "99").await;

    let mut config = test_config(&server, &dir);
    with_password(&mut config, "secret");
    let output_dir = config.output.output_dir.clone();

    let summary = run_dump(config).await.expect("login and crawl failed");

    assert_eq!(summary.identifiers, 1);
    assert_eq!(file_names(&output_dir), vec!["user_99.igc"]);
}

#[tokio::test]
async fn test_rejected_login_is_fatal() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login_page(&server).await;

    // Wrong credentials re-render the login page at the same URL
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_PAGE))
        .mount(&server)
        .await;
    forbid_listing(&server).await;

    let mut config = test_config(&server, &dir);
    with_password(&mut config, "wrong");
    config.output.track_file = Some(cache_path(&dir));

    let result = run_dump(config).await;

    assert!(matches!(
        result,
        Err(DumpError::Auth(AuthError::Rejected { ref username, .. })) if username == "user"
    ));
    assert!(!cache_path(&dir).exists());
}

#[tokio::test]
async fn test_login_timeout() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/user/user")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    forbid_listing(&server).await;

    let mut config = test_config(&server, &dir);
    with_password(&mut config, "secret");
    config.crawler.login_timeout_secs = 1;

    let result = run_dump(config).await;

    assert!(matches!(
        result,
        Err(DumpError::Auth(AuthError::Timeout { seconds: 1 }))
    ));
}

#[tokio::test]
async fn test_missing_login_form() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let mut config = test_config(&server, &dir);
    with_password(&mut config, "secret");

    let result = run_dump(config).await;
    assert!(matches!(
        result,
        Err(DumpError::Auth(AuthError::FormNotFound { .. }))
    ));
}
