//! Error types for API calls.
//!
//! Callers collapse every variant into one "no usable response" failure; the
//! variants exist so logs can say what actually went wrong.

use thiserror::Error;

use super::ApiAction;

/// Errors that can occur while talking to the Webshare API.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("API client construction failed: {reason}\n  Suggestion: Check the TLS and proxy configuration")]
    ClientBuild {
        /// Why construction failed
        reason: String,
    },

    /// The request never produced a readable response (DNS, connect, TLS, timeout)
    #[error("request to '{action}' failed: {reason}\n  Suggestion: Check network connectivity and retry")]
    Transport {
        /// The action being called
        action: ApiAction,
        /// Transport-level failure description
        reason: String,
    },

    /// The response body is not an API document
    #[error("malformed response from '{action}': {reason}")]
    Malformed {
        /// The action being called
        action: ApiAction,
        /// Parser failure description
        reason: String,
    },

    /// The API answered with a status other than `OK`
    #[error("'{action}' returned status '{status}'{}", message_suffix(.message))]
    Status {
        /// The action being called
        action: ApiAction,
        /// Value of the `status` field (empty when absent)
        status: String,
        /// Value of the `message` field, if the API sent one
        message: Option<String>,
    },

    /// A successful response lacked a required field
    #[error("'{action}' response has no usable '{field}' field")]
    MissingField {
        /// The action being called
        action: ApiAction,
        /// The field that was expected
        field: &'static str,
    },
}

#[allow(clippy::ref_option)]
fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Creates a `Transport` error from a `reqwest` failure.
    #[must_use]
    pub fn transport(action: ApiAction, error: &reqwest::Error) -> Self {
        let reason = if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };
        Self::Transport { action, reason }
    }

    /// Returns the action this error belongs to, if any.
    #[must_use]
    pub fn action(&self) -> Option<ApiAction> {
        match self {
            Self::ClientBuild { .. } => None,
            Self::Transport { action, .. }
            | Self::Malformed { action, .. }
            | Self::Status { action, .. }
            | Self::MissingField { action, .. } => Some(*action),
        }
    }
}
