use crate::error::ResourceResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const PROVIDER_NAME: &str = "zmesh";

/// Outcome of one lifecycle operation.
///
/// An empty `state_id` means the object does not exist remotely; in that case
/// `state_last_updated` is empty too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceResponse<T> {
    pub state_id: String,
    pub state: T,
    pub state_last_updated: String
}

impl<T> ResourceResponse<T> {
    pub fn new(state_id: impl Into<String>, state: T, state_last_updated: impl Into<String>) -> Self {
        Self {
            state_id: state_id.into(),
            state,
            state_last_updated: state_last_updated.into()
        }
    }

    pub fn absent(state: T) -> Self {
        Self::new("", state, "")
    }

    pub fn exists(&self) -> bool {
        !self.state_id.is_empty()
    }
}

/// Declarative lifecycle of one kind of remote object.
///
/// `Model` is both the plan (desired state) and the reported state.
#[async_trait]
pub trait Resource: Send + Sync {
    type Model: Serialize + DeserializeOwned + Default + Clone + Send + Sync;

    /// Resource type suffix, appended to [`PROVIDER_NAME`].
    const TYPE_NAME: &'static str;

    fn type_name(&self) -> String {
        format!("{}{}", PROVIDER_NAME, Self::TYPE_NAME)
    }

    async fn create(&self, plan: &Self::Model) -> ResourceResult<ResourceResponse<Self::Model>>;

    /// `prior` is the last known state; it is returned as-is when the state id
    /// is empty.
    async fn read(
        &self,
        state_id: &str,
        prior: Self::Model
    ) -> ResourceResult<ResourceResponse<Self::Model>>;

    async fn update(
        &self,
        plan_id: &str,
        plan: &Self::Model
    ) -> ResourceResult<ResourceResponse<Self::Model>>;

    async fn delete(&self, state_id: &str) -> ResourceResult<()>;
}
