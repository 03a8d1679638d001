//! Maps declared member policies onto what the catalog API reports.
//!
//! The API has no per-policy lookup, so a policy is identified by a composite
//! key `<objectId>:<member>[:<column>]` and found again by scanning the
//! per-object list.

pub mod error;
pub mod member;
pub mod search;
pub mod state_id;


pub use error::{ReconcileError, ReconcileResult};
pub use member::{infer_member, member_from_plan};
pub use search::{find_created, find_existing};
pub use state_id::{DELIMITER, PolicyKey, build_state_id, parse_state_id};
