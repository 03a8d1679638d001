//! Live and scheduled hypertables. Both map onto the same catalog endpoint and
//! differ only in which fields they manage.

use crate::error::ResourceResult;
use crate::resource::{Resource, ResourceResponse};
use crate::timestamp::{freshness_marker, now_marker};
use async_trait::async_trait;
use catalog_client::{CatalogClient, Hypertable, ScheduledStage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveHypertableState {
    pub id: String,
    pub name: String,
    pub description: String,
    pub short_name: String,
    pub tags: Vec<String>,
    pub admins: Vec<String>,
    pub refresh_mode: String,
    pub sql_select: String
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduledHypertableState {
    pub id: String,
    pub name: String,
    pub description: String,
    pub short_name: String,
    pub tags: Vec<String>,
    pub admins: Vec<String>,
    pub refresh_mode: String,
    pub cron_timing: String,
    pub cron_timing_string: String,
    pub stages: Vec<StageState>,
    pub backing_table: String,
    pub backing_table_update_mode: String,
    pub primary_keys: Vec<String>,
    pub partition_keys: Vec<String>,
    pub rest_endpoint: String
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageState {
    pub id: i64,
    pub query: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub run_status: String,
    pub start_time: String,
    pub duration: String,
    pub errors: i64
}

/// Converts between the managed state and the wire model.
trait HypertableModel: Sized {
    fn to_payload(&self) -> Hypertable;
    fn from_remote(table: Hypertable) -> Self;
    fn with_id(self, id: String) -> Self;
}

impl HypertableModel for LiveHypertableState {
    fn to_payload(&self) -> Hypertable {
        Hypertable {
            name: self.name.clone(),
            description: self.description.clone(),
            short_name: self.short_name.clone(),
            tags: self.tags.clone(),
            admins: self.admins.clone(),
            refresh_mode: self.refresh_mode.clone(),
            sql_select: self.sql_select.clone(),
            ..Default::default()
        }
    }

    fn from_remote(table: Hypertable) -> Self {
        Self {
            id: table.id,
            name: table.name,
            description: table.description,
            short_name: table.short_name,
            tags: table.tags,
            admins: table.admins,
            refresh_mode: table.refresh_mode,
            sql_select: table.sql_select
        }
    }

    fn with_id(self, id: String) -> Self {
        Self { id, ..self }
    }
}

/// Stages are numbered `1..n` in list order.
fn number_stages<T>(stages: impl IntoIterator<Item = T>, to_stage: impl Fn(i64, T) -> StageState) -> Vec<StageState> {
    (1..).zip(stages).map(|(id, stage)| to_stage(id, stage)).collect()
}

impl StageState {
    fn to_wire(&self) -> ScheduledStage {
        ScheduledStage {
            id: self.id,
            query: self.query.clone(),
            name: self.name.clone(),
            short_name: self.short_name.clone(),
            description: self.description.clone(),
            run_status: self.run_status.clone(),
            start_time: self.start_time.clone(),
            duration: self.duration.clone(),
            errors: self.errors
        }
    }

    fn from_wire(id: i64, stage: ScheduledStage) -> Self {
        Self {
            id,
            query: stage.query,
            name: stage.name,
            short_name: stage.short_name,
            description: stage.description,
            run_status: stage.run_status,
            start_time: stage.start_time,
            duration: stage.duration,
            errors: stage.errors
        }
    }
}

impl ScheduledHypertableState {
    fn numbered_stages(&self) -> Vec<StageState> {
        number_stages(&self.stages, |id, stage| StageState {
            id,
            ..stage.clone()
        })
    }
}

impl HypertableModel for ScheduledHypertableState {
    fn to_payload(&self) -> Hypertable {
        Hypertable {
            name: self.name.clone(),
            description: self.description.clone(),
            short_name: self.short_name.clone(),
            tags: self.tags.clone(),
            admins: self.admins.clone(),
            refresh_mode: self.refresh_mode.clone(),
            cron_timing: self.cron_timing.clone(),
            cron_timing_string: self.cron_timing_string.clone(),
            stages: self.numbered_stages().iter().map(StageState::to_wire).collect(),
            backing_table: self.backing_table.clone(),
            backing_table_update_mode: self.backing_table_update_mode.clone(),
            primary_keys: self.primary_keys.clone(),
            partition_keys: self.partition_keys.clone(),
            rest_endpoint: self.rest_endpoint.clone(),
            ..Default::default()
        }
    }

    fn from_remote(table: Hypertable) -> Self {
        Self {
            id: table.id,
            name: table.name,
            description: table.description,
            short_name: table.short_name,
            tags: table.tags,
            admins: table.admins,
            refresh_mode: table.refresh_mode,
            cron_timing: table.cron_timing,
            cron_timing_string: table.cron_timing_string,
            stages: number_stages(table.stages, StageState::from_wire),
            backing_table: table.backing_table,
            backing_table_update_mode: table.backing_table_update_mode,
            primary_keys: table.primary_keys,
            partition_keys: table.partition_keys,
            rest_endpoint: table.rest_endpoint
        }
    }

    fn with_id(self, id: String) -> Self {
        Self {
            id,
            stages: self.numbered_stages(),
            ..self
        }
    }
}

/// Shared lifecycle for both hypertable flavours.
struct HypertableOps {
    client: Arc<CatalogClient>
}

impl HypertableOps {
    async fn create<M: HypertableModel + Clone>(&self, plan: &M) -> ResourceResult<ResourceResponse<M>> {
        let created = self.client.create_hypertable(&plan.to_payload()).await?;
        info!(id = %created.id, "Hypertable created");

        let state = plan.clone().with_id(created.id.clone());
        Ok(ResourceResponse::new(created.id, state, now_marker()))
    }

    async fn read<M: HypertableModel>(&self, state_id: &str, prior: M) -> ResourceResult<ResourceResponse<M>> {
        if state_id.is_empty() {
            return Ok(ResourceResponse::absent(prior));
        }

        let table = self.client.read_hypertable(state_id).await?;
        if table.deleted {
            debug!(id = %state_id, "Hypertable is flagged deleted");
            return Ok(ResourceResponse::absent(prior));
        }
        Self::refreshed(table)
    }

    async fn update<M: HypertableModel>(&self, plan_id: &str, plan: &M) -> ResourceResult<ResourceResponse<M>> {
        self.client
            .update_hypertable(plan_id, &plan.to_payload())
            .await?;
        info!(id = %plan_id, "Hypertable updated");

        let table = self.client.read_hypertable(plan_id).await?;
        Self::refreshed(table)
    }

    async fn delete(&self, state_id: &str) -> ResourceResult<()> {
        self.client.delete_hypertable(state_id).await?;
        info!(id = %state_id, "Hypertable deleted");
        Ok(())
    }

    fn refreshed<M: HypertableModel>(table: Hypertable) -> ResourceResult<ResourceResponse<M>> {
        let marker = freshness_marker(&table.last_modified_date)?;
        let id = table.id.clone();
        Ok(ResourceResponse::new(id, M::from_remote(table), marker))
    }
}

/// A hypertable defined by a live SQL select.
pub struct HypertableResource {
    ops: HypertableOps
}

impl HypertableResource {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            ops: HypertableOps { client }
        }
    }
}

#[async_trait]
impl Resource for HypertableResource {
    type Model = LiveHypertableState;

    const TYPE_NAME: &'static str = "_hypertable";

    async fn create(&self, plan: &LiveHypertableState) -> ResourceResult<ResourceResponse<LiveHypertableState>> {
        self.ops.create(plan).await
    }

    async fn read(
        &self,
        state_id: &str,
        prior: LiveHypertableState
    ) -> ResourceResult<ResourceResponse<LiveHypertableState>> {
        self.ops.read(state_id, prior).await
    }

    async fn update(
        &self,
        plan_id: &str,
        plan: &LiveHypertableState
    ) -> ResourceResult<ResourceResponse<LiveHypertableState>> {
        self.ops.update(plan_id, plan).await
    }

    async fn delete(&self, state_id: &str) -> ResourceResult<()> {
        self.ops.delete(state_id).await
    }
}

/// A hypertable materialized on a cron schedule through ordered stages.
pub struct ScheduledHypertableResource {
    ops: HypertableOps
}

impl ScheduledHypertableResource {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            ops: HypertableOps { client }
        }
    }
}

#[async_trait]
impl Resource for ScheduledHypertableResource {
    type Model = ScheduledHypertableState;

    const TYPE_NAME: &'static str = "_hypertable_scheduled";

    async fn create(
        &self,
        plan: &ScheduledHypertableState
    ) -> ResourceResult<ResourceResponse<ScheduledHypertableState>> {
        self.ops.create(plan).await
    }

    async fn read(
        &self,
        state_id: &str,
        prior: ScheduledHypertableState
    ) -> ResourceResult<ResourceResponse<ScheduledHypertableState>> {
        self.ops.read(state_id, prior).await
    }

    async fn update(
        &self,
        plan_id: &str,
        plan: &ScheduledHypertableState
    ) -> ResourceResult<ResourceResponse<ScheduledHypertableState>> {
        self.ops.update(plan_id, plan).await
    }

    async fn delete(&self, state_id: &str) -> ResourceResult<()> {
        self.ops.delete(state_id).await
    }
}
