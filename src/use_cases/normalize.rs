use axum::http::StatusCode;
use serde_json::{Value, json};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::envelope::{self, ApiResponse};
use crate::domain::errors::{AppError, UnclassifiedFailure};
use crate::domain::ports::{DiagnosticSink, ResponseEmitter};

pub const VALIDATION_ERROR_NAME: &str = "Validation Error";
pub const UPSTREAM_ERROR_NAME: &str = "Axios Error";
pub const SYNTAX_ERROR_NAME: &str = "Syntax Error";
pub const SYNTAX_ERROR_MESSAGE: &str = "Invalid JSON syntax in the request body.";
pub const FALLBACK_MESSAGE: &str =
    "Something went wrong on our end. Please check result for more info.";

// Fixed namespace for error fingerprints.
const REFERENCE_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_8d3b_4c57_9a10_5e2f_7b3d_c041);

/// How much of an unclassified error reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disclosure {
    /// Only an opaque reference; the full error goes to the diagnostic sink.
    #[default]
    Redacted,
    /// Name, message and cause chain are embedded in `result`.
    Verbose,
}

impl FromStr for Disclosure {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redacted" => Ok(Disclosure::Redacted),
            "verbose" => Ok(Disclosure::Verbose),
            other => Err(format!("unknown error disclosure mode: {other}")),
        }
    }
}

/// Terminal error handler: classifies an [`AppError`], logs it, and emits the
/// JSON envelope through the given emitter. Never fails.
pub struct ErrorNormalizer<S> {
    disclosure: Disclosure,
    sink: S,
}

impl<S> ErrorNormalizer<S>
where
    S: DiagnosticSink,
{
    pub fn new(disclosure: Disclosure, sink: S) -> Self {
        Self { disclosure, sink }
    }

    pub fn disclosure(&self) -> Disclosure {
        self.disclosure
    }

    pub fn handle<E>(&self, err: &AppError, emitter: &E) -> E::Output
    where
        E: ResponseEmitter,
    {
        let reference = match err {
            AppError::Unclassified(failure) => Some(reference_for(failure)),
            _ => None,
        };

        // Logged before anything is emitted, whatever the category.
        self.sink.record(err, reference.as_ref());

        let (status, body) = self.render_with(err, reference);
        emitter.emit(body, status)
    }

    /// Pure classification and formatting, without the logging side effect.
    pub fn render(&self, err: &AppError) -> (StatusCode, ApiResponse<Value>) {
        let reference = match err {
            AppError::Unclassified(failure) => Some(reference_for(failure)),
            _ => None,
        };
        self.render_with(err, reference)
    }

    fn render_with(
        &self,
        err: &AppError,
        reference: Option<Uuid>,
    ) -> (StatusCode, ApiResponse<Value>) {
        // Arms follow the classification precedence.
        match err {
            AppError::Validation(failure) => (
                failure.status,
                ApiResponse::failure(
                    envelope::VALIDATION_ERROR,
                    VALIDATION_ERROR_NAME,
                    failure.message.clone(),
                    Value::Object(failure.details.clone()),
                ),
            ),
            AppError::Upstream(failure) => (
                failure.client_status(),
                ApiResponse::failure(
                    envelope::EXTERNAL_API_ERROR,
                    UPSTREAM_ERROR_NAME,
                    failure.client_message(),
                    failure.client_body(),
                ),
            ),
            AppError::MalformedInput(_) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure(
                    envelope::BAD_REQUEST,
                    SYNTAX_ERROR_NAME,
                    SYNTAX_ERROR_MESSAGE,
                    Value::Null,
                ),
            ),
            AppError::Unclassified(failure) => {
                let reference = reference.unwrap_or_else(|| reference_for(failure));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(
                        envelope::INTERNAL_SERVER_ERROR,
                        failure.display_name(),
                        FALLBACK_MESSAGE,
                        self.fallback_result(failure, reference),
                    ),
                )
            }
        }
    }

    fn fallback_result(&self, failure: &UnclassifiedFailure, reference: Uuid) -> Value {
        match self.disclosure {
            Disclosure::Redacted => json!({ "reference": reference.to_string() }),
            Disclosure::Verbose => json!({
                "name": failure.display_name(),
                "message": failure.message,
                "causes": failure.causes,
                "reference": reference.to_string(),
            }),
        }
    }
}

// Name-based so that the same failure always maps to the same reference.
pub fn reference_for(failure: &UnclassifiedFailure) -> Uuid {
    let key = format!("{}\n{}", failure.display_name(), failure.message);
    Uuid::new_v5(&REFERENCE_NAMESPACE, key.as_bytes())
}
