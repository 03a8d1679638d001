use crate::client::CatalogClient;
use crate::de::nullable;
use crate::error::ClientResult;
use reqwest::Method;
use serde::{Deserialize, Serialize};

const HYPERTABLE_PATH: &str = "/api/v1/catalog/hypertable/";

/// A table-like catalog object. Live hypertables use `sql_select`; scheduled
/// ones use the cron, stage and backing-table fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hypertable {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub last_modified_date: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub short_name: String,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub admins: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub refresh_mode: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub sql_select: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub cron_timing: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub cron_timing_string: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub stages: Vec<ScheduledStage>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub backing_table: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub backing_table_update_mode: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub primary_keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub partition_keys: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub rest_endpoint: String,
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "nullable")]
    pub deleted: bool
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduledStage {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub query: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub short_name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub run_status: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub start_time: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub duration: String,
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "nullable")]
    pub errors: i64
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl CatalogClient {
    pub async fn create_hypertable(&self, payload: &Hypertable) -> ClientResult<Hypertable> {
        self.call_json(Method::POST, HYPERTABLE_PATH, Some(payload))
            .await
    }

    pub async fn read_hypertable(&self, id: &str) -> ClientResult<Hypertable> {
        let path = format!("{}{}", HYPERTABLE_PATH, id);
        self.call_json(Method::GET, &path, None::<&()>).await
    }

    pub async fn update_hypertable(&self, id: &str, payload: &Hypertable) -> ClientResult<Hypertable> {
        let path = format!("{}{}", HYPERTABLE_PATH, id);
        self.call_json(Method::PUT, &path, Some(payload)).await
    }

    pub async fn delete_hypertable(&self, id: &str) -> ClientResult<()> {
        let path = format!("{}{}", HYPERTABLE_PATH, id);
        self.call(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
