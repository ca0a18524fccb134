//! Shared response envelope types for API handlers.
//!
//! Endpoints consumed by the host or the client script return the host's own
//! shapes; service-local listings use the `{ "data": ... }` envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
