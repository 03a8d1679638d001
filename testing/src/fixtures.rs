use serde_json::{Value, json};
use std::sync::atomic::{AtomicU32, Ordering};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN_PATH: &str = "/api/v1/account/login";
pub const TEST_ORGANISATION: &str = "acme";
pub const TEST_EMAIL: &str = "ops@acme.io";
pub const TEST_PASSWORD: &str = "s3cret";

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn unique_id(prefix: &str) -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}

/// A wiremock server standing in for the catalog API.
pub struct MockCatalog {
    server: MockServer
}

impl MockCatalog {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        tracing::debug!("Mock catalog API started at {}", server.uri());
        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Accepts the test credentials and sets the given session pair.
    pub async fn mount_login(&self, session: &str, token: &str) {
        self.login_mock(session, token).mount(&self.server).await;
    }

    /// Same as [`mount_login`](Self::mount_login) but verified on drop to have
    /// been hit exactly `times` times.
    pub async fn mount_login_expecting(&self, session: &str, token: &str, times: u64) {
        self.login_mock(session, token)
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Answers the first login only, so a later mount can hand out a
    /// different session pair.
    pub async fn mount_login_once(&self, session: &str, token: &str) {
        self.login_mock(session, token)
            .up_to_n_times(1)
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Successful status but no session cookies.
    pub async fn mount_login_without_cookies(&self) {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_login_rejected(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    fn login_mock(&self, session: &str, token: &str) -> Mock {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(body_partial_json(json!({
                "organisationname": TEST_ORGANISATION,
                "email": TEST_EMAIL,
                "password": TEST_PASSWORD
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .append_header("Set-Cookie", format!("SESSION={}; Path=/; HttpOnly", session))
                    .append_header("Set-Cookie", format!("XSRF-TOKEN={}; Path=/", token))
            )
    }
}

/// Matches the `Cookie` header the client sends for a session pair.
pub fn session_cookie(session: &str, token: &str) -> String {
    format!("SESSION={}; XSRF-TOKEN={}", session, token)
}

pub fn error_body(status: u16, message: &str) -> Value {
    json!({
        "timestamp": "2024-01-15T10:30:00.000+00:00",
        "status": status,
        "message": message,
        "error": "Error",
        "errors": [],
        "path": "/api/v1"
    })
}

pub fn validation_error_body(message: &str, default_message: &str, rejected_value: Value) -> Value {
    json!({
        "status": 400,
        "message": message,
        "error": "Bad Request",
        "errors": [{
            "codes": ["NotBlank"],
            "defaultMessage": default_message,
            "objectName": "payload",
            "field": "name",
            "rejectedValue": rejected_value,
            "bindingFailure": false,
            "code": "NotBlank"
        }]
    })
}

pub fn datasource_body(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "lastModifiedDate": "2024-01-15T10:30:00.123456",
        "name": name,
        "description": "Primary orders database",
        "tags": ["prod"],
        "admins": [TEST_EMAIL],
        "shortName": "orders",
        "connectionMetadata": "{\"host\":\"db\"}",
        "dbConnector": "postgres",
        "dbSubConnector": "aurora",
        "dbSubConnectorDisplayName": "Aurora",
        "deleted": false
    })
}

pub fn live_hypertable_body(id: &str, sql: &str) -> Value {
    json!({
        "id": id,
        "lastModifiedDate": "2024-01-15T10:30:00.5",
        "name": "Orders",
        "description": "Live orders view",
        "shortName": "orders",
        "tags": [],
        "admins": [TEST_EMAIL],
        "refreshMode": "LIVE",
        "sqlSelect": sql,
        "restEndpoint": "/rest/orders",
        "deleted": false
    })
}

pub fn scheduled_hypertable_body(id: &str, stages: &[(&str, &str)]) -> Value {
    let stages: Vec<Value> = stages
        .iter()
        .enumerate()
        .map(|(i, (name, query))| {
            json!({
                "id": i + 1,
                "name": name,
                "shortName": name,
                "query": query,
                "runStatus": "SUCCESS",
                "errors": 0
            })
        })
        .collect();

    json!({
        "id": id,
        "lastModifiedDate": "2024-01-15T10:30:00.5",
        "name": "Nightly",
        "description": "Nightly rollup",
        "shortName": "nightly",
        "tags": [],
        "admins": [TEST_EMAIL],
        "refreshMode": "SCHEDULED",
        "cronTiming": "0 0 * * *",
        "cronTimingString": "At 00:00",
        "stages": stages,
        "backingTable": "nightly_rollup",
        "backingTableUpdateMode": "REPLACE",
        "primaryKeys": ["id"],
        "partitionKeys": [],
        "deleted": false
    })
}

/// One policy list entry: `(policy_id, member, column)`.
pub type PolicyRow<'a> = (&'a str, &'a str, &'a str);

pub fn policy_list_body(object_id: &str, users: &[PolicyRow<'_>], groups: &[PolicyRow<'_>]) -> Value {
    let entries = |rows: &[PolicyRow<'_>]| -> Vec<Value> {
        rows.iter()
            .map(|(policy_id, member, column)| {
                json!({
                    "policyId": policy_id,
                    "member": member,
                    "column": column,
                    "maskingOption": "",
                    "filterExpression": ""
                })
            })
            .collect()
    };

    json!({
        "statusCode": 200,
        "objectId": object_id,
        "users": entries(users),
        "groups": entries(groups)
    })
}
