use crate::error::ResourceResult;
use crate::resource::{Resource, ResourceResponse};
use crate::timestamp::{freshness_marker, now_marker};
use async_trait::async_trait;
use catalog_client::{CatalogClient, Datasource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasourceState {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub admins: Vec<String>,
    pub short_name: String,
    pub connection_metadata: String,
    pub db_connector: String,
    pub db_sub_connector: String,
    pub db_sub_connector_display_name: String
}

impl DatasourceState {
    fn to_payload(&self) -> Datasource {
        Datasource {
            name: self.name.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            admins: self.admins.clone(),
            short_name: self.short_name.clone(),
            connection_metadata: self.connection_metadata.clone(),
            db_connector: self.db_connector.clone(),
            db_sub_connector: self.db_sub_connector.clone(),
            db_sub_connector_display_name: self.db_sub_connector_display_name.clone(),
            ..Default::default()
        }
    }
}

impl From<Datasource> for DatasourceState {
    fn from(source: Datasource) -> Self {
        Self {
            id: source.id,
            name: source.name,
            description: source.description,
            tags: source.tags,
            admins: source.admins,
            short_name: source.short_name,
            connection_metadata: source.connection_metadata,
            db_connector: source.db_connector,
            db_sub_connector: source.db_sub_connector,
            db_sub_connector_display_name: source.db_sub_connector_display_name
        }
    }
}

pub struct DatasourceResource {
    client: Arc<CatalogClient>
}

impl DatasourceResource {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self { client }
    }

    fn refreshed(source: Datasource) -> ResourceResult<ResourceResponse<DatasourceState>> {
        let marker = freshness_marker(&source.last_modified_date)?;
        let id = source.id.clone();
        Ok(ResourceResponse::new(id, source.into(), marker))
    }
}

#[async_trait]
impl Resource for DatasourceResource {
    type Model = DatasourceState;

    const TYPE_NAME: &'static str = "_datasource";

    async fn create(&self, plan: &DatasourceState) -> ResourceResult<ResourceResponse<DatasourceState>> {
        let created = self.client.create_datasource(&plan.to_payload()).await?;
        info!(id = %created.id, name = %plan.name, "Datasource created");

        let state = DatasourceState {
            id: created.id.clone(),
            ..plan.clone()
        };
        Ok(ResourceResponse::new(created.id, state, now_marker()))
    }

    async fn read(
        &self,
        state_id: &str,
        prior: DatasourceState
    ) -> ResourceResult<ResourceResponse<DatasourceState>> {
        if state_id.is_empty() {
            return Ok(ResourceResponse::absent(prior));
        }

        let source = self.client.read_datasource(state_id).await?;
        if source.deleted {
            debug!(id = %state_id, "Datasource is flagged deleted");
            return Ok(ResourceResponse::absent(prior));
        }
        Self::refreshed(source)
    }

    async fn update(
        &self,
        plan_id: &str,
        plan: &DatasourceState
    ) -> ResourceResult<ResourceResponse<DatasourceState>> {
        self.client
            .update_datasource(plan_id, &plan.to_payload())
            .await?;
        info!(id = %plan_id, "Datasource updated");

        let source = self.client.read_datasource(plan_id).await?;
        Self::refreshed(source)
    }

    async fn delete(&self, state_id: &str) -> ResourceResult<()> {
        self.client.delete_datasource(state_id).await?;
        info!(id = %state_id, "Datasource deleted");
        Ok(())
    }
}
