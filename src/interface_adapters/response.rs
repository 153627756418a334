use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::OnceLock;

use crate::domain::envelope;
use crate::domain::errors::{AppError, SyntaxFailure, UnclassifiedFailure, ValidationFailure};
use crate::interface_adapters::emitter::AxumJsonEmitter;
use crate::interface_adapters::sink::TracingSink;
use crate::use_cases::normalize::{Disclosure, ErrorNormalizer};

pub type Normalizer = ErrorNormalizer<TracingSink>;

static NORMALIZER: OnceLock<Normalizer> = OnceLock::new();

/// Installs the process-wide normalizer used by `AppError::into_response`.
/// Returns the rejected normalizer if one was already installed.
pub fn install(normalizer: Normalizer) -> Result<(), Normalizer> {
    NORMALIZER.set(normalizer)
}

// Falls back to a redacting normalizer when nothing was installed.
pub fn installed() -> &'static Normalizer {
    NORMALIZER.get_or_init(|| ErrorNormalizer::new(Disclosure::default(), TracingSink))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        installed().handle(&self, &AxumJsonEmitter)
    }
}

// A validation failure rendered on its own, outside the normalizer.
impl IntoResponse for ValidationFailure {
    fn into_response(self) -> Response {
        let body = json!({
            "error": envelope::VALIDATION_ERROR,
            "message": self.message,
            "details": self.details,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(err) => SyntaxFailure::new(err.body_text()).into(),
            JsonRejection::JsonDataError(err) => {
                ValidationFailure::new("Request body does not match the expected shape.")
                    .with_detail("body", err.body_text())
                    .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                    .into()
            }
            JsonRejection::MissingJsonContentType(_) => {
                ValidationFailure::new("Request body must be JSON.")
                    .with_detail("content-type", "expected application/json")
                    .with_status(StatusCode::UNSUPPORTED_MEDIA_TYPE)
                    .into()
            }
            other => UnclassifiedFailure::named("JsonRejection", other.body_text()).into(),
        }
    }
}

/// `axum::Json`, except that rejections are normalized like any other error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
