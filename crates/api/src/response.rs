//! Response envelope shared by every `/api/v1` handler.
//!
//! Payloads are wrapped as `{ "data": ... }` so the client can read every
//! success body the same way.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
