use std::{env, time::Duration};

use crate::use_cases::normalize::Disclosure;

// Runtime/server settings read from the environment.

pub fn http_port() -> u16 {
    env::var("HTTP_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

pub fn upstream_service_url() -> String {
    env::var("UPSTREAM_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:3002".to_string())
}

pub fn upstream_timeout() -> Duration {
    let millis = env::var("UPSTREAM_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1500);
    Duration::from_millis(millis)
}

// Unknown values fall back to redaction so a typo never exposes internals.
pub fn error_disclosure() -> Disclosure {
    match env::var("ERROR_DISCLOSURE") {
        Ok(value) => value.parse().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to redacted error disclosure.");
            Disclosure::Redacted
        }),
        Err(_) => Disclosure::Redacted,
    }
}

#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub disclosure: Disclosure,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        Self {
            upstream_url: upstream_service_url(),
            upstream_timeout: upstream_timeout(),
            disclosure: error_disclosure(),
        }
    }
}
