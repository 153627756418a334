use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::Profile;
use crate::domain::envelope::ApiResponse;
use crate::domain::errors::{AppError, ErrorKind};
use crate::domain::ports::{DiagnosticSink, ProfileStore, ResponseEmitter};

// Emitter that hands the serialized body straight back to the test.
pub(crate) struct RecordingEmitter;

impl ResponseEmitter for RecordingEmitter {
    type Output = (StatusCode, Value);

    fn emit(&self, body: ApiResponse<Value>, status: StatusCode) -> Self::Output {
        let body = serde_json::to_value(body).expect("envelope should serialize");
        (status, body)
    }
}

// Sink that remembers what was logged, in order.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    records: Arc<Mutex<Vec<(ErrorKind, Option<Uuid>)>>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn records(&self) -> Vec<(ErrorKind, Option<Uuid>)> {
        self.records.lock().expect("records mutex poisoned").clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, error: &AppError, reference: Option<&Uuid>) {
        let mut guard = self.records.lock().expect("records mutex poisoned");
        guard.push((error.kind(), reference.copied()));
    }
}

#[derive(Clone)]
pub(crate) struct RecordingStore {
    profiles: Arc<Mutex<Vec<Profile>>>,
    fail_insert: bool,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            profiles: Arc::new(Mutex::new(Vec::new())),
            fail_insert: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_insert: true,
            ..Self::new()
        }
    }

    pub(crate) fn stored(&self) -> Vec<Profile> {
        self.profiles.lock().expect("profiles mutex poisoned").clone()
    }
}

#[async_trait]
impl ProfileStore for RecordingStore {
    async fn insert(&self, profile: Profile) -> Result<(), String> {
        if self.fail_insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.profiles.lock().expect("profiles mutex poisoned");
        guard.push(profile);
        Ok(())
    }
}
