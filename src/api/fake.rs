//! Recording transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ApiAction, ApiError, ApiResponse, ApiTransport};

/// Answers each action with a canned body and records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    bodies: HashMap<ApiAction, String>,
    calls: Mutex<Vec<(ApiAction, Vec<(String, String)>)>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Canned body for `action`. Actions without one fail as unreachable.
    pub(crate) fn respond(mut self, action: ApiAction, body: impl Into<String>) -> Self {
        self.bodies.insert(action, body.into());
        self
    }

    /// Answers the whole login flow successfully.
    pub(crate) fn logged_in() -> Self {
        Self::new()
            .respond(
                ApiAction::Salt,
                "<response><status>OK</status><salt>Ab3dE6gH</salt></response>",
            )
            .respond(
                ApiAction::Login,
                "<response><status>OK</status><token>tok-123</token></response>",
            )
    }

    pub(crate) fn count(&self, action: ApiAction) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.iter().filter(|(a, _)| *a == action).count())
            .unwrap_or_default()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    /// Value of `field` in the most recent call to `action`.
    pub(crate) fn last_field(&self, action: ApiAction, field: &str) -> Option<String> {
        let calls = self.calls.lock().ok()?;
        calls
            .iter()
            .rev()
            .find(|(a, _)| *a == action)
            .and_then(|(_, fields)| fields.iter().find(|(k, _)| k == field))
            .map(|(_, v)| v.clone())
    }
}

#[async_trait]
impl ApiTransport for RecordingTransport {
    async fn request(
        &self,
        action: ApiAction,
        fields: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((
                action,
                fields
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            ));
        }

        match self.bodies.get(&action) {
            Some(body) => ApiResponse::parse(action, body.clone()),
            None => Err(ApiError::Transport {
                action,
                reason: "connection refused".to_string(),
            }),
        }
    }
}
