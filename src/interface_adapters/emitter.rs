use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::domain::envelope::ApiResponse;
use crate::domain::ports::ResponseEmitter;

// Builds an `application/json` axum response from the envelope.
pub struct AxumJsonEmitter;

impl ResponseEmitter for AxumJsonEmitter {
    type Output = Response;

    fn emit(&self, body: ApiResponse<Value>, status: StatusCode) -> Self::Output {
        (status, Json(body)).into_response()
    }
}
