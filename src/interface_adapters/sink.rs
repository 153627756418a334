use uuid::Uuid;

use crate::domain::errors::AppError;
use crate::domain::ports::DiagnosticSink;

// Writes every handled error to the tracing pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, error: &AppError, reference: Option<&Uuid>) {
        let kind = error.kind().as_str();
        match reference {
            Some(reference) => {
                tracing::error!(kind, %reference, error = ?error, "caught error in error handler")
            }
            None => tracing::error!(kind, error = ?error, "caught error in error handler"),
        }
    }
}
