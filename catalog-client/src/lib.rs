//! Session-authenticated client for the ZMesh catalog REST API.
//!
//! Every business call goes through [`CatalogClient`], which logs in lazily,
//! attaches the session cookies and anti-forgery token, and re-authenticates
//! once when the server answers 401.

pub mod api_error;
pub mod client;
mod de;
pub mod datasource;
pub mod error;
pub mod hypertable;
pub mod policy;
pub mod session;
pub mod transport;

pub use api_error::{ApiErrorBody, ValidationError, translate_error_body};
pub use client::CatalogClient;
pub use datasource::Datasource;
pub use error::{ClientError, ClientResult, MALFORMED_ERROR_MESSAGE};
pub use hypertable::{Hypertable, ScheduledStage};
pub use policy::{Member, PolicyEntry, PolicyKind, PolicyList, PolicyRequest};
pub use session::{Credentials, Session, SessionManager};
pub use transport::{ApiRequest, DEFAULT_TIMEOUT, HttpTransport, RawResponse};
