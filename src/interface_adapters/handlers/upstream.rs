use crate::domain::envelope::ApiResponse;
use crate::domain::errors::AppError;
use crate::interface_adapters::state::AppState;
use crate::use_cases::relay::RelayUseCase;
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;
use std::sync::Arc;

#[tracing::instrument(name = "relay", skip_all, fields(path = %path))]
pub async fn relay(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let use_case = RelayUseCase {
        upstream: state.upstream.clone(),
    };

    let body = use_case.execute(&path).await?;

    Ok(Json(ApiResponse::ok(
        "Upstream",
        "Upstream request succeeded.",
        body,
    )))
}
