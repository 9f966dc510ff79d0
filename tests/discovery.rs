use std::time::Duration;

use favscan::http::DEFAULT_HEADERS;
use favscan::{FaviconError, Icon, RequestOptions};
use reqwest::StatusCode;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_favicon(server: &MockServer, status: u16) {
    Mock::given(method("HEAD"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_default_icon_keeps_non_default_port() {
    let server = MockServer::start().await;
    mount_page(&server, "/blog/index.html", "body").await;
    mount_favicon(&server, 200).await;

    let url = format!("{}/blog/index.html?q=mock", server.uri());
    let icons = favscan::get(&url, &RequestOptions::default()).await.unwrap();

    // The mock server listens on an ephemeral port, which must be kept.
    assert_eq!(icons, [Icon::new(format!("{}/favicon.ico", server.uri()), 0, 0, "ico")]);
}

#[tokio::test]
async fn test_tags_and_default_icon_ranked() {
    let server = MockServer::start().await;
    let html = r#"
        <html>
        <head>
            <link rel="icon" href="/favicon.ico">
            <link rel="icon" type="image/png" href="/favicon-32x32.png">
            <link rel="apple-touch-icon" sizes="180x180" href="/apple-touch-icon.png">
            <link rel="icon" href="data:image/png;base64,AAAA">
            <meta name="msapplication-TileImage" content="/mstile-144x144.png">
        </head>
        </html>
    "#;
    mount_page(&server, "/", html).await;
    mount_favicon(&server, 200).await;

    let icons = favscan::get(&server.uri(), &RequestOptions::default()).await.unwrap();
    let uri = server.uri();

    assert_eq!(
        icons,
        [
            Icon::new(format!("{uri}/apple-touch-icon.png"), 180, 180, "png"),
            Icon::new(format!("{uri}/mstile-144x144.png"), 144, 144, "png"),
            Icon::new(format!("{uri}/favicon-32x32.png"), 32, 32, "png"),
            Icon::new(format!("{uri}/favicon.ico"), 0, 0, "ico"),
        ]
    );
}

#[tokio::test]
async fn test_page_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503).set_body_string(r#"<link rel="icon" href="a">"#))
        .mount(&server)
        .await;
    mount_favicon(&server, 200).await;

    let err = favscan::get(&server.uri(), &RequestOptions::default()).await.unwrap_err();

    assert!(err.is_fetch_failure());
    assert!(matches!(err, FaviconError::HttpStatus { status: StatusCode::SERVICE_UNAVAILABLE, .. }));
}

#[tokio::test]
async fn test_page_redirect_changes_base() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new/"))
        .mount(&server)
        .await;
    mount_page(&server, "/new/", r#"<link rel="shortcut icon" href="icon.gif">"#).await;

    let url = format!("{}/old", server.uri());
    let icons = favscan::get(&url, &RequestOptions::default()).await.unwrap();

    // No favicon.ico is mounted, so the probe quietly finds nothing.
    assert_eq!(icons, [Icon::new(format!("{}/new/icon.gif", server.uri()), 0, 0, "gif")]);
}

#[tokio::test]
async fn test_probe_reports_redirect_target() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "").await;
    Mock::given(method("HEAD"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/static/favicon.ico"))
        .mount(&server)
        .await;
    Mock::given(path("/static/favicon.ico"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let icons = favscan::get(&server.uri(), &RequestOptions::default()).await.unwrap();

    assert_eq!(icons, [Icon::new(format!("{}/static/favicon.ico", server.uri()), 0, 0, "ico")]);
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    let (name, value) = DEFAULT_HEADERS[0];
    // The user agent contains commas, which the `header` matcher splits on.
    Mock::given(method("GET"))
        .and(path("/"))
        .and(move |req: &Request| {
            req.headers.get(name).and_then(|v| v.to_str().ok()) == Some(value)
        })
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let icons = favscan::get(&server.uri(), &RequestOptions::default()).await.unwrap();
    assert!(icons.is_empty());
}

#[tokio::test]
async fn test_custom_headers_reach_page_and_probe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "favscan-test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/favicon.ico"))
        .and(header("user-agent", "favscan-test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let options = RequestOptions::default().with_headers([("User-Agent", "favscan-test")]);
    let icons = favscan::get(&server.uri(), &options).await.unwrap();

    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].format(), "ico");
}

#[tokio::test]
async fn test_page_charset_is_honored() {
    let server = MockServer::start().await;
    // Latin-1 encoded page: 0xF4 is 'ô'.
    let body = b"<link rel=\"icon\" href=\"/ic\xF4ne.png\">".to_vec();
    let page = ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=iso-8859-1");
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page)
        .mount(&server)
        .await;

    let icons = favscan::get(&server.uri(), &RequestOptions::default()).await.unwrap();

    assert_eq!(icons, [Icon::new(format!("{}/ic%C3%B4ne.png", server.uri()), 0, 0, "png")]);
}

#[tokio::test]
async fn test_page_timeout_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let options = RequestOptions::default().with_timeout(Duration::from_millis(200));
    let err = favscan::get(&server.uri(), &options).await.unwrap_err();

    assert!(matches!(err, FaviconError::HttpRequest { .. }));
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn test_probe_timeout_means_no_default_icon() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<link rel="icon" href="/logo.svg">"#).await;
    Mock::given(method("HEAD"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let options = RequestOptions::default().with_timeout(Duration::from_millis(500));
    let icons = favscan::get(&server.uri(), &options).await.unwrap();

    assert_eq!(icons, [Icon::new(format!("{}/logo.svg", server.uri()), 0, 0, "svg")]);
}

#[tokio::test]
async fn test_download_icon_bytes() {
    let server = MockServer::start().await;
    let bytes = vec![0x00, 0x00, 0x01, 0x00, 0x01, 0x00];
    Mock::given(method("GET"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.clone()))
        .mount(&server)
        .await;

    let icon = Icon::new(format!("{}/favicon.ico", server.uri()), 0, 0, "ico");
    let downloaded = favscan::download(&icon, &RequestOptions::default()).await.unwrap();
    assert_eq!(downloaded, bytes);

    let missing = Icon::new(format!("{}/missing.png", server.uri()), 0, 0, "png");
    let err = favscan::download(&missing, &RequestOptions::default()).await.unwrap_err();
    assert!(matches!(err, FaviconError::HttpStatus { status: StatusCode::NOT_FOUND, .. }));
}
