//! Shared test fixtures for the ZMesh workspace.
//!
//! Provides a mock catalog API built on wiremock:
//! - login endpoint that hands out `SESSION` / `XSRF-TOKEN` cookies
//! - canned response bodies for catalog objects, policy lists and API errors
//!
//! Fixtures only speak HTTP and JSON, so crates under test can depend on this
//! one without a cycle.

mod fixtures;

pub use fixtures::*;
