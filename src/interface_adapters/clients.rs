use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::domain::errors::{AppError, UpstreamFailure, is_truthy};
use crate::domain::ports::UpstreamApi;

// Thin wrapper around reqwest for calls to the upstream service.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    pub base_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

// Transport failures never reached the upstream, so only a status (if any) survives.
// The URL is stripped so internal addresses stay out of client messages.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        AppError::Upstream(UpstreamFailure {
            message: err.to_string(),
            status: err.status(),
            body: None,
        })
    }
}

#[async_trait]
impl UpstreamApi for UpstreamClient {
    async fn fetch(&self, path: &str) -> Result<Value, AppError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let res = self.http.get(url).timeout(self.timeout).send().await?;
        let status = res.status();

        // Keep upstream status and body so the envelope can relay them.
        if !status.is_success() {
            let body = res.text().await.ok().and_then(|text| parse_body(&text));
            return Err(UpstreamFailure::response(
                status,
                body,
                format!("Request failed with status code {}", status.as_u16()),
            )
            .into());
        }

        // Success bodies are taken as they come: 204 or empty is null, text stays text.
        let text = res.text().await?;
        Ok(parse_body(&text).unwrap_or(Value::Null))
    }
}

// JSON when it parses, the raw text otherwise, nothing for an empty or falsy body.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    let body = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
    Some(body).filter(is_truthy)
}
