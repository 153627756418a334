use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Profile;
use crate::domain::envelope::ApiResponse;
use crate::domain::errors::AppError;

// Port for turning a finished body and status into a framework response.
pub trait ResponseEmitter {
    type Output;

    fn emit(&self, body: ApiResponse<Value>, status: StatusCode) -> Self::Output;
}

// Port for the operational diagnostic stream. Fire-and-forget.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, error: &AppError, reference: Option<&Uuid>);
}

// Port for the outbound service the relay endpoint talks to.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Value, AppError>;
}

#[async_trait]
impl<T> UpstreamApi for Arc<T>
where
    T: UpstreamApi + ?Sized,
{
    async fn fetch(&self, path: &str) -> Result<Value, AppError> {
        (**self).fetch(path).await
    }
}

// Port for profile storage used by the profile use case.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert(&self, profile: Profile) -> Result<(), String>;
}
