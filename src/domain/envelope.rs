use serde::Serialize;

// Category labels written to the `error` field of failed responses.
pub const VALIDATION_ERROR: &str = "Validation Error";
pub const EXTERNAL_API_ERROR: &str = "External API Error";
pub const BAD_REQUEST: &str = "Bad Request";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

// Uniform JSON body shared by success and error responses.
// Field order is part of the wire contract: success, error, name, message, result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub name: String,
    pub message: String,
    pub result: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(name: impl Into<String>, message: impl Into<String>, result: T) -> Self {
        Self {
            success: true,
            error: None,
            name: name.into(),
            message: message.into(),
            result,
        }
    }

    pub fn failure(
        category: &str,
        name: impl Into<String>,
        message: impl Into<String>,
        result: T,
    ) -> Self {
        Self {
            success: false,
            error: Some(category.to_string()),
            name: name.into(),
            message: message.into(),
            result,
        }
    }
}
