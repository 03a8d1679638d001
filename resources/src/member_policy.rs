//! Plumbing shared by the three member-policy resources.

use crate::error::{ResourceError, ResourceResult};
use catalog_client::{CatalogClient, Member, PolicyKind, PolicyList, PolicyRequest};
use reconcile::{PolicyKey, infer_member};
use std::sync::Arc;
use tracing::{debug, info};

/// Body a successful policy create answers with.
const CREATED_MARKER: &str = "true";

pub(crate) struct PolicyOps {
    client: Arc<CatalogClient>,
    kind: PolicyKind
}

impl PolicyOps {
    pub(crate) fn new(client: Arc<CatalogClient>, kind: PolicyKind) -> Self {
        Self { client, kind }
    }

    /// Posts the policy and fails with `failure` unless the server answers
    /// with the literal `true`.
    pub(crate) async fn create(&self, request: &PolicyRequest, failure: &str) -> ResourceResult<()> {
        let answer = self.client.create_policy(self.kind, request).await?;
        if answer.trim() != CREATED_MARKER {
            debug!(kind = %self.kind, answer = %answer, "Policy create was not acknowledged");
            return Err(ResourceError::CreateFailed(failure.to_string()));
        }
        info!(kind = %self.kind, hypertable_id = %request.hypertable_id, "Policy created");
        Ok(())
    }

    pub(crate) async fn list(&self, object_id: &str) -> ResourceResult<PolicyList> {
        Ok(self.client.list_policies(self.kind, object_id).await?)
    }

    /// Like [`list`](Self::list), but an unknown object is `None`.
    pub(crate) async fn list_if_exists(&self, object_id: &str) -> ResourceResult<Option<PolicyList>> {
        match self.client.list_policies(self.kind, object_id).await {
            Ok(list) => Ok(Some(list)),
            Err(err) if err.is_not_found() => {
                debug!(kind = %self.kind, object_id = %object_id, "Policy list not found");
                Ok(None)
            }
            Err(err) => Err(err.into())
        }
    }

    /// Deletes the policy named by `key`. The member kind is not stored in the
    /// key and is inferred from the member name.
    pub(crate) async fn delete(&self, key: &PolicyKey) -> ResourceResult<()> {
        let member = infer_member(&key.member);
        let mut request = PolicyRequest::new(key.object_id.clone(), &member);
        if let Some(column) = key.column() {
            request = request.with_column(column);
        }

        self.client.delete_policy(self.kind, &request).await?;
        info!(kind = %self.kind, hypertable_id = %key.object_id, member = %key.member, "Policy deleted");
        Ok(())
    }
}

/// `(user_email, group_name)` for a member.
pub(crate) fn member_fields(member: &Member) -> (String, String) {
    match member {
        Member::User(email) => (email.clone(), String::new()),
        Member::Group(group) => (String::new(), group.clone())
    }
}
