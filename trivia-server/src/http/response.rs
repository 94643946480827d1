//! Success envelope: `{"success": true, ...payload}`

use axum::Json;
use serde::Serialize;

use super::error::ApiError;

/// Handler result carrying an enveloped payload.
pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(flatten)]
    payload: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(payload: T) -> Json<Self> {
        Json(Self {
            success: true,
            payload,
        })
    }
}
