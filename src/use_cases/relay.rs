use serde_json::Value;

use crate::domain::errors::{AppError, ValidationFailure};
use crate::domain::ports::UpstreamApi;
use axum::http::StatusCode;

// Relays a read to the upstream service.
pub struct RelayUseCase<U> {
    pub upstream: U,
}

impl<U> RelayUseCase<U>
where
    U: UpstreamApi,
{
    pub async fn execute(&self, path: &str) -> Result<Value, AppError> {
        let path = path.trim_matches('/');
        if path.is_empty() || path.split('/').any(|segment| segment == "..") {
            return Err(ValidationFailure::new("Upstream path is invalid.")
                .with_detail("path", "must be a non-empty relative path")
                .with_status(StatusCode::BAD_REQUEST)
                .into());
        }

        self.upstream.fetch(path).await
    }
}
