use thiserror::Error;

pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("both user email and group name cannot be provided")]
    BothMembers,

    #[error("either user email or group name must be provided")]
    NoMember
}
