use crate::error::{ResourceError, ResourceResult};
use crate::member_policy::{PolicyOps, member_fields};
use crate::resource::{Resource, ResourceResponse};
use crate::timestamp::now_marker;
use async_trait::async_trait;
use catalog_client::{CatalogClient, PolicyKind, PolicyRequest};
use reconcile::{PolicyKey, find_created, find_existing, member_from_plan};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Masks one column of a hypertable for one user or group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataMaskState {
    pub policy_id: String,
    pub hypertable_id: String,
    pub user_email: String,
    pub group_name: String,
    pub masking_option: String,
    pub column: String
}

pub struct DataMaskResource {
    ops: PolicyOps
}

impl DataMaskResource {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            ops: PolicyOps::new(client, PolicyKind::Mask)
        }
    }
}

#[async_trait]
impl Resource for DataMaskResource {
    type Model = DataMaskState;

    const TYPE_NAME: &'static str = "_hypertable_data_mask";

    async fn create(&self, plan: &DataMaskState) -> ResourceResult<ResourceResponse<DataMaskState>> {
        let member = member_from_plan(Some(plan.user_email.as_str()), Some(plan.group_name.as_str()))?;
        if plan.column.is_empty() {
            return Err(ResourceError::InvalidPlan("column is required".to_string()));
        }

        let request = PolicyRequest::new(plan.hypertable_id.clone(), &member)
            .with_column(plan.column.clone())
            .with_masking_option(plan.masking_option.clone());
        self.ops
            .create(&request, "failed to create data mask")
            .await?;

        let list = self.ops.list(&plan.hypertable_id).await?;
        let entry = find_created(&list, &member, Some(plan.column.as_str()))
            .ok_or_else(|| ResourceError::CreateFailed("failed to create data mask".to_string()))?;

        let (user_email, group_name) = member_fields(&member);
        let state = DataMaskState {
            policy_id: entry.policy_id.clone(),
            hypertable_id: list.hypertable_id.clone(),
            user_email,
            group_name,
            masking_option: entry.masking_option.clone(),
            column: entry.column.clone()
        };
        let key = PolicyKey::triple(list.hypertable_id.clone(), member.name(), entry.column.clone());
        Ok(ResourceResponse::new(key.to_state_id(), state, now_marker()))
    }

    async fn read(&self, state_id: &str, prior: DataMaskState) -> ResourceResult<ResourceResponse<DataMaskState>> {
        let Some(key) = PolicyKey::parse_triple(state_id) else {
            return Ok(ResourceResponse::absent(prior));
        };
        let Some(list) = self.ops.list_if_exists(&key.object_id).await? else {
            return Ok(ResourceResponse::absent(prior));
        };

        let Some((member, entry)) = find_existing(&list, &key.member, key.column()) else {
            return Ok(ResourceResponse::absent(DataMaskState::default()));
        };

        let (user_email, group_name) = member_fields(&member);
        let state = DataMaskState {
            policy_id: entry.policy_id.clone(),
            hypertable_id: list.hypertable_id.clone(),
            user_email,
            group_name,
            masking_option: entry.masking_option.clone(),
            column: entry.column.clone()
        };
        Ok(ResourceResponse::new(key.to_state_id(), state, now_marker()))
    }

    async fn update(&self, _plan_id: &str, _plan: &DataMaskState) -> ResourceResult<ResourceResponse<DataMaskState>> {
        Err(ResourceError::update_not_supported())
    }

    async fn delete(&self, state_id: &str) -> ResourceResult<()> {
        let key = PolicyKey::parse_triple(state_id).ok_or_else(ResourceError::invalid_member_state_id)?;
        self.ops.delete(&key).await
    }
}
