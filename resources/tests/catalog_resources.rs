use catalog_client::{CatalogClient, Credentials};
use resources::{
    DatasourceResource, DatasourceState, HypertableResource, LiveHypertableState, Resource,
    ResourceError, ScheduledHypertableResource, ScheduledHypertableState, StageState
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use testing::{
    MockCatalog, TEST_EMAIL, TEST_ORGANISATION, TEST_PASSWORD, datasource_body, error_body,
    live_hypertable_body, scheduled_hypertable_body, unique_id
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn setup() -> (MockCatalog, Arc<CatalogClient>) {
    let mock = MockCatalog::start().await;
    mock.mount_login("abc", "xyz").await;
    let client = CatalogClient::new(
        Credentials::new(mock.uri(), TEST_ORGANISATION, TEST_EMAIL, TEST_PASSWORD),
        Duration::from_secs(5)
    )
    .unwrap();
    (mock, Arc::new(client))
}

fn datasource_plan() -> DatasourceState {
    DatasourceState {
        name: "Orders".to_string(),
        short_name: "orders".to_string(),
        db_connector: "postgres".to_string(),
        tags: vec!["prod".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_datasource_create_reports_server_id() {
    let (mock, client) = setup().await;
    let id = unique_id("ds");

    Mock::given(method("POST"))
        .and(path("/api/v1/catalog/meshdb/"))
        .and(body_partial_json(json!({ "name": "Orders", "dbConnector": "postgres" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(datasource_body(&id, "Orders")))
        .expect(1)
        .mount(mock.server())
        .await;

    let resource = DatasourceResource::new(client);
    let response = resource.create(&datasource_plan()).await.unwrap();

    assert_eq!(response.state_id, id);
    assert_eq!(response.state.id, id);
    assert_eq!(response.state.name, "Orders");
    assert!(response.state_last_updated.ends_with(" UTC"));
    assert_eq!(resource.type_name(), "zmesh_datasource");
}

#[tokio::test]
async fn test_datasource_read_refreshes_state() {
    let (mock, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/catalog/meshdb/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datasource_body("ds-1", "Orders")))
        .mount(mock.server())
        .await;

    let response = DatasourceResource::new(client)
        .read("ds-1", DatasourceState::default())
        .await
        .unwrap();

    assert_eq!(response.state_id, "ds-1");
    assert_eq!(response.state.db_sub_connector, "aurora");
    assert_eq!(response.state_last_updated, "Monday, 15-Jan-24 10:30:00 UTC");
}

#[tokio::test]
async fn test_deleted_datasource_reads_as_absent() {
    let (mock, client) = setup().await;
    let mut body = datasource_body("ds-1", "Orders");
    body["deleted"] = json!(true);

    Mock::given(method("GET"))
        .and(path("/api/v1/catalog/meshdb/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock.server())
        .await;

    let prior = datasource_plan();
    let response = DatasourceResource::new(client)
        .read("ds-1", prior.clone())
        .await
        .unwrap();

    assert!(!response.exists());
    assert_eq!(response.state_id, "");
    assert_eq!(response.state_last_updated, "");
    assert_eq!(response.state, prior);
}

#[tokio::test]
async fn test_empty_state_id_reads_without_calling_api() {
    let mock = MockCatalog::start().await;
    mock.mount_login_expecting("abc", "xyz", 0).await;
    let client = CatalogClient::new(
        Credentials::new(mock.uri(), TEST_ORGANISATION, TEST_EMAIL, TEST_PASSWORD),
        Duration::from_secs(5)
    )
    .unwrap();

    let response = DatasourceResource::new(Arc::new(client))
        .read("", datasource_plan())
        .await
        .unwrap();

    assert!(!response.exists());
    assert_eq!(response.state.name, "Orders");
}

#[tokio::test]
async fn test_update_with_failed_read_back_is_an_error() {
    let (mock, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/catalog/meshdb/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datasource_body("ds-1", "Orders")))
        .expect(1)
        .mount(mock.server())
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/catalog/meshdb/ds-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_body(500, "read failed")))
        .expect(1)
        .mount(mock.server())
        .await;

    let err = DatasourceResource::new(client)
        .update("ds-1", &datasource_plan())
        .await
        .unwrap_err();

    assert!(matches!(err, ResourceError::Client(_)));
    assert_eq!(err.to_string(), "read failed");
}

#[tokio::test]
async fn test_live_hypertable_update_reads_back() {
    let (mock, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/catalog/hypertable/ht-1"))
        .and(body_partial_json(json!({ "refreshMode": "LIVE", "sqlSelect": "select id from orders" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_hypertable_body("ht-1", "select id from orders")))
        .expect(1)
        .mount(mock.server())
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/catalog/hypertable/ht-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_hypertable_body("ht-1", "select id from orders")))
        .expect(1)
        .mount(mock.server())
        .await;

    let plan = LiveHypertableState {
        name: "Orders".to_string(),
        short_name: "orders".to_string(),
        refresh_mode: "LIVE".to_string(),
        sql_select: "select id from orders".to_string(),
        ..Default::default()
    };
    let response = HypertableResource::new(client)
        .update("ht-1", &plan)
        .await
        .unwrap();

    assert_eq!(response.state_id, "ht-1");
    assert_eq!(response.state.sql_select, "select id from orders");
    assert_eq!(response.state_last_updated, "Monday, 15-Jan-24 10:30:00 UTC");
}

#[tokio::test]
async fn test_scheduled_hypertable_create_numbers_stages() {
    let (mock, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/catalog/hypertable/"))
        .and(body_partial_json(json!({
            "refreshMode": "SCHEDULED",
            "cronTiming": "0 0 * * *",
            "stages": [
                { "id": 1, "name": "extract", "query": "select 1" },
                { "id": 2, "name": "load", "query": "select 2" }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(scheduled_hypertable_body(
            "ht-2",
            &[("extract", "select 1"), ("load", "select 2")]
        )))
        .expect(1)
        .mount(mock.server())
        .await;

    let stage = |name: &str, query: &str| StageState {
        name: name.to_string(),
        short_name: name.to_string(),
        query: query.to_string(),
        ..Default::default()
    };
    let plan = ScheduledHypertableState {
        name: "Nightly".to_string(),
        short_name: "nightly".to_string(),
        refresh_mode: "SCHEDULED".to_string(),
        cron_timing: "0 0 * * *".to_string(),
        stages: vec![stage("extract", "select 1"), stage("load", "select 2")],
        backing_table: "nightly_rollup".to_string(),
        ..Default::default()
    };

    let resource = ScheduledHypertableResource::new(client);
    let response = resource.create(&plan).await.unwrap();

    assert_eq!(response.state_id, "ht-2");
    assert_eq!(response.state.stages[1].id, 2);
    assert_eq!(resource.type_name(), "zmesh_hypertable_scheduled");
}

#[tokio::test]
async fn test_scheduled_hypertable_read() {
    let (mock, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/catalog/hypertable/ht-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scheduled_hypertable_body(
            "ht-2",
            &[("extract", "select 1")]
        )))
        .mount(mock.server())
        .await;

    let response = ScheduledHypertableResource::new(client)
        .read("ht-2", ScheduledHypertableState::default())
        .await
        .unwrap();

    assert_eq!(response.state.backing_table, "nightly_rollup");
    assert_eq!(response.state.stages.len(), 1);
    assert_eq!(response.state.stages[0].run_status, "SUCCESS");
    assert_eq!(response.state.primary_keys, vec!["id".to_string()]);
}

#[tokio::test]
async fn test_delete_hypertable() {
    let (mock, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/catalog/hypertable/ht-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(mock.server())
        .await;

    HypertableResource::new(client).delete("ht-1").await.unwrap();
}
