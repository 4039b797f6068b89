//! Use-case boundary over the catalog services.
//!
//! Callers (CLI, future transports) get status + body envelopes and never see
//! service error types directly.

pub mod api;
pub mod response;

pub use api::{BookRequest, NamedEntityRequest};
pub use response::{error_response, ApiResponse};
