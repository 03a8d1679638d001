use crate::error::{ResourceError, ResourceResult};
use crate::member_policy::{PolicyOps, member_fields};
use crate::resource::{Resource, ResourceResponse};
use crate::timestamp::now_marker;
use async_trait::async_trait;
use catalog_client::{CatalogClient, PolicyKind, PolicyRequest};
use reconcile::{PolicyKey, find_existing, member_from_plan};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Grants one user or group access to a hypertable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessControlState {
    pub hypertable_id: String,
    pub user_email: String,
    pub group_name: String
}

pub struct AccessControlResource {
    ops: PolicyOps
}

impl AccessControlResource {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            ops: PolicyOps::new(client, PolicyKind::Access)
        }
    }
}

#[async_trait]
impl Resource for AccessControlResource {
    type Model = AccessControlState;

    const TYPE_NAME: &'static str = "_hypertable_access_control";

    /// Grants are not read back; the id is derived from the plan.
    async fn create(&self, plan: &AccessControlState) -> ResourceResult<ResourceResponse<AccessControlState>> {
        let member = member_from_plan(Some(plan.user_email.as_str()), Some(plan.group_name.as_str()))?;
        let request = PolicyRequest::new(plan.hypertable_id.clone(), &member);
        self.ops
            .create(&request, "failed to update access control")
            .await?;

        let key = PolicyKey::pair(plan.hypertable_id.clone(), member.name());
        Ok(ResourceResponse::new(key.to_state_id(), plan.clone(), now_marker()))
    }

    async fn read(
        &self,
        state_id: &str,
        prior: AccessControlState
    ) -> ResourceResult<ResourceResponse<AccessControlState>> {
        let Some(key) = PolicyKey::parse_pair(state_id) else {
            return Ok(ResourceResponse::absent(prior));
        };
        let Some(list) = self.ops.list_if_exists(&key.object_id).await? else {
            return Ok(ResourceResponse::absent(prior));
        };

        match find_existing(&list, &key.member, None) {
            Some((member, _)) => {
                let (user_email, group_name) = member_fields(&member);
                let state = AccessControlState {
                    hypertable_id: list.hypertable_id.clone(),
                    user_email,
                    group_name
                };
                Ok(ResourceResponse::new(key.to_state_id(), state, now_marker()))
            }
            None => {
                debug!(state_id = %state_id, "Access grant no longer exists");
                Ok(ResourceResponse::absent(AccessControlState::default()))
            }
        }
    }

    async fn update(
        &self,
        _plan_id: &str,
        _plan: &AccessControlState
    ) -> ResourceResult<ResourceResponse<AccessControlState>> {
        Err(ResourceError::update_not_supported())
    }

    async fn delete(&self, state_id: &str) -> ResourceResult<()> {
        let key = PolicyKey::parse_pair(state_id).ok_or_else(ResourceError::invalid_member_state_id)?;
        self.ops.delete(&key).await
    }
}
