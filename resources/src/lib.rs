//! Declarative lifecycle for ZMesh catalog objects and member policies.
//!
//! Each resource turns a desired state (the plan) into catalog API calls and
//! reports back a [`ResourceResponse`]: the identifier to persist, the
//! refreshed state and a freshness marker.

pub mod access_control;
pub mod data_mask;
pub mod datasource;
pub mod error;
pub mod hypertable;
mod member_policy;
pub mod resource;
pub mod row_filter;
pub mod timestamp;

pub use access_control::{AccessControlResource, AccessControlState};
pub use data_mask::{DataMaskResource, DataMaskState};
pub use datasource::{DatasourceResource, DatasourceState};
pub use error::{ResourceError, ResourceResult};
pub use hypertable::{
    HypertableResource, LiveHypertableState, ScheduledHypertableResource,
    ScheduledHypertableState, StageState
};
pub use resource::{PROVIDER_NAME, Resource, ResourceResponse};
pub use row_filter::{RowFilterResource, RowFilterState};
