use crate::client::CatalogClient;
use crate::de::nullable;
use crate::error::ClientResult;
use reqwest::Method;
use serde::{Deserialize, Serialize};

const DATASOURCE_PATH: &str = "/api/v1/catalog/meshdb/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Datasource {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub last_modified_date: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub admins: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub short_name: String,
    #[serde(deserialize_with = "nullable")]
    pub connection_metadata: String,
    #[serde(deserialize_with = "nullable")]
    pub db_connector: String,
    #[serde(deserialize_with = "nullable")]
    pub db_sub_connector: String,
    #[serde(deserialize_with = "nullable")]
    pub db_sub_connector_display_name: String,
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "nullable")]
    pub deleted: bool
}

impl CatalogClient {
    pub async fn create_datasource(&self, payload: &Datasource) -> ClientResult<Datasource> {
        self.call_json(Method::POST, DATASOURCE_PATH, Some(payload))
            .await
    }

    pub async fn read_datasource(&self, id: &str) -> ClientResult<Datasource> {
        let path = format!("{}{}", DATASOURCE_PATH, id);
        self.call_json(Method::GET, &path, None::<&()>).await
    }

    pub async fn update_datasource(&self, id: &str, payload: &Datasource) -> ClientResult<Datasource> {
        let path = format!("{}{}", DATASOURCE_PATH, id);
        self.call_json(Method::PUT, &path, Some(payload)).await
    }

    pub async fn delete_datasource(&self, id: &str) -> ClientResult<()> {
        let path = format!("{}{}", DATASOURCE_PATH, id);
        self.call(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
