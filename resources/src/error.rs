use catalog_client::ClientError;
use reconcile::ReconcileError;
use thiserror::Error;

pub type ResourceResult<T> = Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{0}")]
    InvalidPlan(String),

    #[error("{0}")]
    InvalidStateId(String),

    #[error("{0}")]
    CreateFailed(String),

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("Invalid last modified date: {0}")]
    Timestamp(#[from] chrono::ParseError)
}

impl From<ReconcileError> for ResourceError {
    fn from(err: ReconcileError) -> Self {
        Self::InvalidPlan(err.to_string())
    }
}

impl ResourceError {
    pub fn update_not_supported() -> Self {
        Self::UnsupportedOperation("update is not supported".to_string())
    }

    pub fn invalid_member_state_id() -> Self {
        Self::InvalidStateId("invalid hypertable ID or user or group".to_string())
    }
}
