//! Parsing of the small XML documents the API answers with.
//!
//! Despite the `Accept: application/json` hint, responses look like
//! `<response><status>OK</status><salt>abcd1234</salt></response>`.

use super::{ApiAction, ApiError};

const STATUS_FIELD: &str = "status";
const MESSAGE_FIELD: &str = "message";
const STATUS_OK: &str = "OK";

/// Returns the text of the top-level element `field`, or `None` when the body
/// is not a well-formed document or has no such element.
///
/// A present but empty element yields `Some("")`.
#[must_use]
pub fn xml_field(body: &str, field: &str) -> Option<String> {
    let doc = roxmltree::Document::parse(body).ok()?;
    doc.root_element()
        .children()
        .find(|node| node.is_element() && node.has_tag_name(field))
        .map(|node| node.text().unwrap_or_default().to_string())
}

/// A response body whose `status` is `OK`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    action: ApiAction,
    body: String,
}

impl ApiResponse {
    /// Validates a raw body for `action`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Malformed`] when the body does not parse and
    /// [`ApiError::Status`] when the status is anything but `OK`.
    pub fn parse(action: ApiAction, body: impl Into<String>) -> Result<Self, ApiError> {
        let body = body.into();

        let status = match roxmltree::Document::parse(&body) {
            Ok(doc) => doc
                .root_element()
                .children()
                .find(|node| node.is_element() && node.has_tag_name(STATUS_FIELD))
                .and_then(|node| node.text())
                .unwrap_or_default()
                .to_string(),
            Err(error) => {
                return Err(ApiError::Malformed {
                    action,
                    reason: error.to_string(),
                });
            }
        };

        if status != STATUS_OK {
            return Err(ApiError::Status {
                action,
                status,
                message: xml_field(&body, MESSAGE_FIELD).filter(|m| !m.is_empty()),
            });
        }

        Ok(Self { action, body })
    }

    /// The action that produced this response.
    #[must_use]
    pub fn action(&self) -> ApiAction {
        self.action
    }

    /// Looks up a top-level field, empty values included.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<String> {
        xml_field(&self.body, name)
    }

    /// Looks up a field that must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingField`] when the field is absent or empty.
    pub fn require(&self, name: &'static str) -> Result<String, ApiError> {
        self.field(name)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::MissingField {
                action: self.action,
                field: name,
            })
    }
}
