use assert_cmd::{Command, cargo_bin_cmd};
use predicates::prelude::predicate;
use testing::{MockCatalog, TEST_EMAIL, TEST_ORGANISATION, TEST_PASSWORD, datasource_body, session_cookie};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

const ZMESH_ENV: [&str; 7] = [
    "ZMESH_CONFIG",
    "ZMESH_HOST",
    "ZMESH_ORGANISATION_NAME",
    "ZMESH_EMAIL",
    "ZMESH_PASSWORD",
    "ZMESH_TIMEOUT_SECONDS",
    "ZMESH_LOG_LEVEL"
];

fn zmesh() -> Command {
    let mut cmd = cargo_bin_cmd!("zmesh");
    for key in ZMESH_ENV {
        cmd.env_remove(key);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

fn zmesh_against(host: &str) -> Command {
    let mut cmd = zmesh();
    cmd.env("ZMESH_HOST", host)
        .env("ZMESH_ORGANISATION_NAME", TEST_ORGANISATION)
        .env("ZMESH_EMAIL", TEST_EMAIL)
        .env("ZMESH_PASSWORD", TEST_PASSWORD)
        .env("ZMESH_TIMEOUT_SECONDS", "5");
    cmd
}

/// The binary blocks while the mock server needs the runtime.
async fn run_blocking(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .expect("command thread panicked")
}

mod help_and_version {
    use super::*;

    #[test]
    fn test_help_lists_resources() {
        zmesh()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("datasource"))
            .stdout(predicate::str::contains("row-filter"));
    }

    #[test]
    fn test_version_flag() {
        zmesh()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("zmesh"));
    }

    #[test]
    fn test_no_args_shows_help() {
        zmesh()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage:"));
    }

    #[test]
    fn test_resource_help_lists_actions() {
        zmesh()
            .args(["data-mask", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("create"))
            .stdout(predicate::str::contains("delete"));
    }
}

mod configuration {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_credentials() {
        zmesh()
            .arg("login")
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid host or credentials received."));
    }

    #[test]
    fn test_invalid_timeout_env() {
        zmesh()
            .env("ZMESH_TIMEOUT_SECONDS", "soon")
            .arg("login")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid environment configuration"));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = TempDir::new().unwrap();
        zmesh()
            .args(["--config"])
            .arg(dir.path().join("absent.toml"))
            .arg("login")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load config file"));
    }
}

mod against_mock_catalog {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_succeeds() {
        let catalog = MockCatalog::start().await;
        catalog.mount_login_expecting("s1", "t1", 1).await;

        let mut cmd = zmesh_against(&catalog.uri());
        cmd.arg("login");

        run_blocking(cmd)
            .await
            .success()
            .stderr(predicate::str::contains("logged in"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_rejected() {
        let catalog = MockCatalog::start().await;
        catalog
            .mount_login_rejected(401, testing::error_body(401, "Bad credentials"))
            .await;

        let mut cmd = zmesh_against(&catalog.uri());
        cmd.arg("login");

        run_blocking(cmd)
            .await
            .failure()
            .stderr(predicate::str::contains("Bad credentials"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_datasource_read_prints_state() {
        let catalog = MockCatalog::start().await;
        catalog.mount_login("s1", "t1").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/catalog/meshdb/ds-1"))
            .and(header("Cookie", session_cookie("s1", "t1").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(datasource_body("ds-1", "Orders DB")))
            .mount(catalog.server())
            .await;

        let mut cmd = zmesh_against(&catalog.uri());
        cmd.args(["datasource", "read", "--id", "ds-1"]);

        run_blocking(cmd)
            .await
            .success()
            .stdout(predicate::str::contains("\"state_id\": \"ds-1\""))
            .stdout(predicate::str::contains("\"name\": \"Orders DB\""))
            .stdout(predicate::str::contains("Monday, 15-Jan-24 10:30:00 UTC"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_row_filter_create_from_plan() {
        let catalog = MockCatalog::start().await;
        catalog.mount_login("s1", "t1").await;
        Mock::given(method("POST"))
            .and(path("/api/v1/access-control/rowFilter"))
            .respond_with(ResponseTemplate::new(200).set_body_string("true"))
            .mount(catalog.server())
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/access-control/rowFilter/H1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(testing::policy_list_body(
                "H1",
                &[("P1", "u@x.com", "age")],
                &[]
            )))
            .mount(catalog.server())
            .await;

        let dir = TempDir::new().unwrap();
        let plan = dir.path().join("plan.json");
        std::fs::write(
            &plan,
            r#"{"hypertable_id":"H1","user_email":"u@x.com","sql_condition":"age>18","column":"age"}"#
        )
        .unwrap();

        let mut cmd = zmesh_against(&catalog.uri());
        cmd.args(["row-filter", "create", "--plan"]).arg(&plan);

        run_blocking(cmd)
            .await
            .success()
            .stdout(predicate::str::contains("\"state_id\": \"H1:u@x.com:age\""))
            .stdout(predicate::str::contains("\"policy_id\": \"P1\""));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_delete_with_bad_id_shape() {
        let catalog = MockCatalog::start().await;
        catalog.mount_login("s1", "t1").await;

        let mut cmd = zmesh_against(&catalog.uri());
        cmd.args(["data-mask", "delete", "--id", "H1"]);

        run_blocking(cmd)
            .await
            .failure()
            .stderr(predicate::str::contains("invalid hypertable ID or user or group"));
    }
}
