//! Per-member policies: access grants, data masks and row filters.
//!
//! The API has no per-policy lookup. Policies are created and deleted by
//! posting the (object, member, column) tuple and read back as the full list
//! for one object, split into user and group partitions.

use crate::client::CatalogClient;
use crate::de::nullable;
use crate::error::ClientResult;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

const ACCESS_CONTROL_PATH: &str = "/api/v1/access-control";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Access,
    Mask,
    RowFilter
}

impl PolicyKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Mask => "mask",
            Self::RowFilter => "rowFilter"
        }
    }

    fn collection_path(self) -> String {
        format!("{}/{}", ACCESS_CONTROL_PATH, self.path_segment())
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// The subject of a policy: exactly one user or one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    User(String),
    Group(String)
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Self::User(name) | Self::Group(name) => name
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Create/delete body shared by the three policy kinds. Only the fields a kind
/// uses are set; unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRequest {
    pub hypertable_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masking_option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>
}

impl PolicyRequest {
    pub fn new(hypertable_id: impl Into<String>, member: &Member) -> Self {
        let mut request = Self {
            hypertable_id: hypertable_id.into(),
            ..Default::default()
        };
        match member {
            Member::User(email) => request.user_email = Some(email.clone()),
            Member::Group(group) => request.group_name = Some(group.clone())
        }
        request
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Empty options are dropped, as the API treats them as absent.
    pub fn with_masking_option(mut self, option: impl Into<String>) -> Self {
        self.masking_option = Some(option.into()).filter(|o| !o.is_empty());
        self
    }

    pub fn with_sql_condition(mut self, condition: impl Into<String>) -> Self {
        self.sql_condition = Some(condition.into()).filter(|c| !c.is_empty());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyList {
    pub status_code: i32,
    #[serde(alias = "objectId", deserialize_with = "nullable")]
    pub hypertable_id: String,
    #[serde(deserialize_with = "nullable")]
    pub users: Vec<PolicyEntry>,
    #[serde(deserialize_with = "nullable")]
    pub groups: Vec<PolicyEntry>
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyEntry {
    #[serde(deserialize_with = "nullable")]
    pub policy_id: String,
    #[serde(deserialize_with = "nullable")]
    pub member: String,
    #[serde(deserialize_with = "nullable")]
    pub column: String,
    #[serde(deserialize_with = "nullable")]
    pub masking_option: String,
    #[serde(deserialize_with = "nullable")]
    pub filter_expression: String
}

impl CatalogClient {
    /// Returns the raw response body. The API answers a successful create
    /// with the bare literal `true`.
    pub async fn create_policy(
        &self,
        kind: PolicyKind,
        payload: &PolicyRequest
    ) -> ClientResult<String> {
        let body = serde_json::to_vec(payload)?;
        let response = self
            .call(Method::POST, &kind.collection_path(), Some(body))
            .await?;
        Ok(response.text())
    }

    pub async fn list_policies(&self, kind: PolicyKind, object_id: &str) -> ClientResult<PolicyList> {
        let path = format!("{}/{}", kind.collection_path(), object_id);
        self.call_json(Method::GET, &path, None::<&()>).await
    }

    pub async fn delete_policy(&self, kind: PolicyKind, payload: &PolicyRequest) -> ClientResult<()> {
        let body = serde_json::to_vec(payload)?;
        self.call(Method::DELETE, &kind.collection_path(), Some(body))
            .await?;
        Ok(())
    }
}
