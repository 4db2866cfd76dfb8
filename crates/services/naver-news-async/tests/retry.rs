use std::net::TcpListener;
use std::time::Duration;

use naver_news_async::{Client, NaverConfig, NaverError, RetryPolicy};
use reqwest::header::HeaderMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry_client(max_attempts: usize) -> Client {
    Client::with_config(NaverConfig::new().without_credentials())
        .unwrap()
        .with_retry_policy(RetryPolicy::new(
            max_attempts,
            Duration::from_millis(10),
        ))
}

#[tokio::test]
async fn retry_503_twice_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_retry_client(3);
    let page = client
        .fetch(&format!("{}/page", server.uri()), &[], HeaderMap::new())
        .await
        .unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.body, "finally");
    assert!(
        page.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/plain")),
        "unexpected content type: {:?}",
        page.content_type
    );
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_retry_client(3);
    let err = client
        .fetch(&format!("{}/missing", server.uri()), &[], HeaderMap::new())
        .await
        .unwrap_err();

    assert!(
        matches!(err, NaverError::HttpStatus { status: 404, .. }),
        "unexpected error: {err:?}"
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rate_limit_exhausts_attempts_and_surfaces_429() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(3)
        .mount(&server)
        .await;

    let client = fast_retry_client(3);
    let err = client
        .fetch(&server.uri(), &[], HeaderMap::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(429));
    if let NaverError::HttpStatus { body, .. } = err {
        assert_eq!(body, "slow down");
    }
}

#[tokio::test]
async fn timeout_is_retried_then_surfaces_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = fast_retry_client(2)
        .with_timeout(Duration::from_millis(100))
        .unwrap();
    let err = client
        .fetch(&server.uri(), &[], HeaderMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, NaverError::Timeout), "unexpected error: {err:?}");
}

#[tokio::test]
async fn connection_failure_surfaces_network_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = fast_retry_client(2);
    let err = client.fetch(&uri, &[], HeaderMap::new()).await.unwrap_err();

    assert!(matches!(err, NaverError::Network(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn invalid_url_fails_without_request() {
    let client = fast_retry_client(3);

    let err = client.fetch("#", &[], HeaderMap::new()).await.unwrap_err();
    assert!(matches!(err, NaverError::InvalidUrl(_)));

    let err = client
        .fetch("ftp://example.com/file", &[], HeaderMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, NaverError::InvalidUrl(_)));
}

#[tokio::test]
async fn redirects_are_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
        .mount(&server)
        .await;

    let client = fast_retry_client(1);
    let page = client
        .fetch(&format!("{}/old", server.uri()), &[], HeaderMap::new())
        .await
        .unwrap();

    assert_eq!(page.body, "moved here");
    assert!(page.final_url.ends_with("/new"));
}
