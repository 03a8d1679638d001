use catalog_client::{ClientError, CatalogClient, Credentials};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use testing::{
    LOGIN_PATH, MockCatalog, TEST_EMAIL, TEST_ORGANISATION, TEST_PASSWORD, datasource_body,
    error_body, session_cookie
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

const DATASOURCE_PATH: &str = "/api/v1/catalog/meshdb/ds-1";

fn client_for(mock: &MockCatalog) -> CatalogClient {
    CatalogClient::new(
        Credentials::new(mock.uri(), TEST_ORGANISATION, TEST_EMAIL, TEST_PASSWORD),
        Duration::from_secs(5)
    )
    .unwrap()
}

#[tokio::test]
async fn test_first_call_logs_in_and_sends_session() {
    let mock = MockCatalog::start().await;
    mock.mount_login_expecting("abc", "xyz", 1).await;

    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .and(header("Cookie", session_cookie("abc", "xyz").as_str()))
        .and(header("X-XSRF-TOKEN", "xyz"))
        .and(header("User-Agent", "PCT"))
        .and(header("Accept", "*/*"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datasource_body("ds-1", "Orders")))
        .expect(2)
        .mount(mock.server())
        .await;

    let client = client_for(&mock);
    assert!(!client.sessions().is_authenticated().await);

    let first = client.read_datasource("ds-1").await.unwrap();
    let second = client.read_datasource("ds-1").await.unwrap();

    assert_eq!(first.name, "Orders");
    assert_eq!(first, second);
    assert!(client.sessions().is_authenticated().await);
    assert_eq!(client.sessions().login_count(), 1);
}

#[tokio::test]
async fn test_expired_session_relogs_once_and_resubmits() {
    let mock = MockCatalog::start().await;
    mock.mount_login_expecting("abc", "xyz", 2).await;

    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body(401, "Unauthorized")))
        .up_to_n_times(1)
        .mount(mock.server())
        .await;
    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(datasource_body("ds-1", "Orders")))
        .expect(1)
        .mount(mock.server())
        .await;

    let client = client_for(&mock);
    let source = client.read_datasource("ds-1").await.unwrap();

    assert_eq!(source.id, "ds-1");
    assert_eq!(client.sessions().login_count(), 2);
}

#[tokio::test]
async fn test_login_request_carries_no_session_headers() {
    let mock = MockCatalog::start().await;
    mock.mount_login("abc", "xyz").await;
    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(datasource_body("ds-1", "Orders")))
        .mount(mock.server())
        .await;

    let client = client_for(&mock);
    client.read_datasource("ds-1").await.unwrap();

    let requests = mock.server().received_requests().await.unwrap();
    let logins: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == LOGIN_PATH)
        .collect();
    assert_eq!(logins.len(), 1);

    let login = logins[0];
    assert!(!login.headers.contains_key("cookie"));
    assert!(!login.headers.contains_key("x-xsrf-token"));
    assert_eq!(login.headers.get("content-type").unwrap(), "application/json");
    assert_eq!(login.headers.get("user-agent").unwrap(), "PCT");
}

#[tokio::test]
async fn test_resubmission_uses_the_fresh_session() {
    let mock = MockCatalog::start().await;
    mock.mount_login_once("old-session", "old-token").await;
    mock.mount_login_expecting("new-session", "new-token", 1).await;

    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .and(header("Cookie", session_cookie("old-session", "old-token").as_str()))
        .and(header("X-XSRF-TOKEN", "old-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body(401, "Unauthorized")))
        .expect(1)
        .mount(mock.server())
        .await;
    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .and(header("Cookie", session_cookie("new-session", "new-token").as_str()))
        .and(header("X-XSRF-TOKEN", "new-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datasource_body("ds-1", "Orders")))
        .expect(1)
        .mount(mock.server())
        .await;

    let client = client_for(&mock);
    let source = client.read_datasource("ds-1").await.unwrap();

    assert_eq!(source.id, "ds-1");
    assert_eq!(client.sessions().login_count(), 2);
}

#[tokio::test]
async fn test_second_unauthorized_is_returned_without_further_retry() {
    let mock = MockCatalog::start().await;
    mock.mount_login_expecting("abc", "xyz", 2).await;

    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body(401, "Unauthorized")))
        .expect(2)
        .mount(mock.server())
        .await;

    let client = client_for(&mock);
    let err = client.read_datasource("ds-1").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn test_login_without_cookies_fails() {
    let mock = MockCatalog::start().await;
    mock.mount_login_without_cookies().await;

    let client = client_for(&mock);
    let err = client.login().await.unwrap_err();

    assert!(matches!(err, ClientError::Login(ref m) if m == "failed to login"));
    assert!(!client.sessions().is_authenticated().await);
}

#[tokio::test]
async fn test_rejected_login_surfaces_translated_message() {
    let mock = MockCatalog::start().await;
    mock.mount_login_rejected(401, error_body(401, "Bad credentials"))
        .await;

    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(mock.server())
        .await;

    let client = client_for(&mock);
    let err = client.read_datasource("ds-1").await.unwrap_err();

    assert!(matches!(err, ClientError::Login(ref m) if m == "Bad credentials"));
    assert!(!client.sessions().is_authenticated().await);
}

#[tokio::test]
async fn test_malformed_error_body() {
    let mock = MockCatalog::start().await;
    mock.mount_login("abc", "xyz").await;

    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(mock.server())
        .await;

    let client = client_for(&mock);
    let err = client.read_datasource("ds-1").await.unwrap_err();

    assert!(matches!(err, ClientError::Malformed));
    assert_eq!(
        err.to_string(),
        "content type mismatch or invalid provider api host or path"
    );
}

#[tokio::test]
async fn test_not_found_is_typed() {
    let mock = MockCatalog::start().await;
    mock.mount_login("abc", "xyz").await;

    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "status": 404, "message": "No datasource ds-1" }))
        )
        .mount(mock.server())
        .await;

    let client = client_for(&mock);
    let err = client.read_datasource("ds-1").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "No datasource ds-1");
}

#[tokio::test]
async fn test_concurrent_calls_share_one_login() {
    let mock = MockCatalog::start().await;
    mock.mount_login_expecting("abc", "xyz", 1).await;

    Mock::given(method("GET"))
        .and(path(DATASOURCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(datasource_body("ds-1", "Orders")))
        .expect(8)
        .mount(mock.server())
        .await;

    let client = Arc::new(client_for(&mock));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            client.read_datasource("ds-1").await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(client.sessions().login_count(), 1);
}
