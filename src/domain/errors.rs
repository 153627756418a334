use axum::http::StatusCode;
use serde_json::{Map, Value};
use std::fmt;

// Explicit discriminant for the error taxonomy, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Upstream,
    MalformedInput,
    Unclassified,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Upstream => "upstream",
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::Unclassified => "unclassified",
        }
    }
}

/// Input validation failure with per-field details.
///
/// The status defaults to 500; callers normally pick a 4xx with
/// [`ValidationFailure::with_status`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub message: String,
    pub details: Map<String, Value>,
    pub status: StatusCode,
}

impl ValidationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Map::new(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = details;
        self
    }

    pub fn with_detail(mut self, field: impl Into<String>, info: impl Into<Value>) -> Self {
        self.details.insert(field.into(), info.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed ({}): {}", self.status, self.message)
    }
}

impl std::error::Error for ValidationFailure {}

// Failure raised by an outbound HTTP call. `status` and `body` are only set
// when the upstream actually answered.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamFailure {
    pub message: String,
    pub status: Option<StatusCode>,
    pub body: Option<Value>,
}

impl UpstreamFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    pub fn response(status: StatusCode, body: Option<Value>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
            body,
        }
    }

    // Upstream's own `message` field wins over ours when it is truthy.
    // Non-string messages are rendered as their JSON text.
    pub fn client_message(&self) -> String {
        match self
            .body
            .as_ref()
            .and_then(|body| body.get("message"))
            .filter(|message| is_truthy(message))
        {
            Some(Value::String(message)) => message.clone(),
            Some(message) => message.to_string(),
            None => self.message.clone(),
        }
    }

    // Falsy bodies are reported as null.
    pub fn client_body(&self) -> Value {
        self.body.clone().filter(is_truthy).unwrap_or(Value::Null)
    }

    pub fn client_status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "upstream error {status}: {}", self.message),
            None => write!(f, "upstream transport error: {}", self.message),
        }
    }
}

impl std::error::Error for UpstreamFailure {}

// Request body that could not be parsed. `detail` is the parser's message and
// is only ever logged.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxFailure {
    pub detail: String,
}

impl SyntaxFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for SyntaxFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed request body: {}", self.detail)
    }
}

impl std::error::Error for SyntaxFailure {}

// Anything that does not fit the other categories.
#[derive(Debug, Clone, PartialEq)]
pub struct UnclassifiedFailure {
    pub name: Option<String>,
    pub message: String,
    pub causes: Vec<String>,
}

impl UnclassifiedFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: None,
            message: message.into(),
            causes: Vec::new(),
        }
    }

    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(message)
        }
    }

    /// Captures an arbitrary error: its short type name, its message and the
    /// messages of its `source()` chain.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error,
    {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            name: short_type_name::<E>(),
            message: err.to_string(),
            causes,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Error")
    }
}

impl fmt::Display for UnclassifiedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.display_name(), self.message)
    }
}

impl std::error::Error for UnclassifiedFailure {}

// "std::io::error::Error" -> "Error", "foo::Wrapper<bar::Baz>" -> "Wrapper".
fn short_type_name<E>() -> Option<String> {
    std::any::type_name::<E>()
        .split('<')
        .next()
        .and_then(|path| path.rsplit("::").next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

// JSON truthiness: null, false, 0 and "" are falsy; arrays and objects never are.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Every error a request handler can raise.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Validation(ValidationFailure),
    Upstream(UpstreamFailure),
    MalformedInput(SyntaxFailure),
    Unclassified(UnclassifiedFailure),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Upstream(_) => ErrorKind::Upstream,
            AppError::MalformedInput(_) => ErrorKind::MalformedInput,
            AppError::Unclassified(_) => ErrorKind::Unclassified,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: std::error::Error,
    {
        AppError::Unclassified(UnclassifiedFailure::from_error(&err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(err) => err.fmt(f),
            AppError::Upstream(err) => err.fmt(f),
            AppError::MalformedInput(err) => err.fmt(f),
            AppError::Unclassified(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ValidationFailure> for AppError {
    fn from(err: ValidationFailure) -> Self {
        AppError::Validation(err)
    }
}

impl From<UpstreamFailure> for AppError {
    fn from(err: UpstreamFailure) -> Self {
        AppError::Upstream(err)
    }
}

impl From<SyntaxFailure> for AppError {
    fn from(err: SyntaxFailure) -> Self {
        AppError::MalformedInput(err)
    }
}

impl From<UnclassifiedFailure> for AppError {
    fn from(err: UnclassifiedFailure) -> Self {
        AppError::Unclassified(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Syntax | Category::Eof => SyntaxFailure::new(err.to_string()).into(),
            Category::Data => ValidationFailure::new("Request body does not match the expected shape.")
                .with_detail("body", err.to_string())
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                .into(),
            Category::Io => AppError::internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn validation_failure_defaults_to_empty_details_and_500() {
        let err = ValidationFailure::new("bad input");

        assert!(err.details.is_empty());
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_failure_detail_keys_stay_unique() {
        let err = ValidationFailure::new("bad input")
            .with_detail("field", "first")
            .with_detail("field", "second");

        assert_eq!(err.details.len(), 1);
        assert_eq!(err.details["field"], "second");
    }

    #[test]
    fn upstream_message_prefers_body_message() {
        let err = UpstreamFailure::response(
            StatusCode::NOT_FOUND,
            Some(json!({ "message": "not found" })),
            "request failed",
        );

        assert_eq!(err.client_message(), "not found");
        assert_eq!(err.client_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_message_keeps_truthy_non_string_messages() {
        let err = UpstreamFailure::response(
            StatusCode::BAD_GATEWAY,
            Some(json!({ "message": 12 })),
            "request failed",
        );

        assert_eq!(err.client_message(), "12");
    }

    #[test]
    fn upstream_message_falls_back_when_body_message_is_falsy() {
        for message in [json!(""), json!(0), json!(false), Value::Null] {
            let err = UpstreamFailure::response(
                StatusCode::BAD_GATEWAY,
                Some(json!({ "message": message })),
                "request failed",
            );

            assert_eq!(err.client_message(), "request failed");
        }
    }

    #[test]
    fn upstream_falsy_body_is_reported_as_null() {
        for body in [json!(""), json!(0), json!(false)] {
            let err = UpstreamFailure::response(StatusCode::BAD_GATEWAY, Some(body), "failed");

            assert_eq!(err.client_body(), Value::Null);
        }
    }

    #[test]
    fn upstream_without_response_reports_500() {
        let err = UpstreamFailure::transport("connection refused");

        assert_eq!(err.client_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "connection refused");
    }

    #[test]
    fn unclassified_from_error_captures_type_name_and_cause_chain() {
        let err = Outer(std::io::Error::other("disk gone"));

        let failure = UnclassifiedFailure::from_error(&err);

        assert_eq!(failure.name.as_deref(), Some("Outer"));
        assert_eq!(failure.message, "outer failed");
        assert_eq!(failure.causes, vec!["disk gone".to_string()]);
    }

    #[test]
    fn unclassified_without_name_displays_as_error() {
        assert_eq!(UnclassifiedFailure::new("boom").display_name(), "Error");
        assert_eq!(UnclassifiedFailure::named("", "boom").display_name(), "Error");
    }

    #[test]
    fn json_syntax_errors_become_malformed_input() {
        let err = serde_json::from_str::<Value>("{\"a\":").expect_err("expected parse failure");

        assert_eq!(AppError::from(err).kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn json_shape_errors_become_validation_failures() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Shape {
            id: u64,
        }

        let err = serde_json::from_str::<Shape>(r#"{"id":"seven"}"#)
            .expect_err("expected data failure");

        match AppError::from(err) {
            AppError::Validation(failure) => {
                assert_eq!(failure.status, StatusCode::UNPROCESSABLE_ENTITY);
                assert!(failure.details.contains_key("body"));
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
