pub mod entities;
pub mod envelope;
pub mod errors;
pub mod ports;

// Re-export the domain boundary types and ports.
pub use entities::Profile;
pub use envelope::ApiResponse;
pub use errors::{
    AppError, ErrorKind, SyntaxFailure, UnclassifiedFailure, UpstreamFailure, ValidationFailure,
};
pub use ports::{DiagnosticSink, ProfileStore, ResponseEmitter, UpstreamApi};
