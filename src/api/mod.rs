//! Webshare API plumbing: actions, transport, response parsing and errors.
//!
//! Every call is a form-encoded POST to `<base>/<action>/` answered by a small
//! XML document. A call only counts as successful when the document parses and
//! its `status` field is `OK`; everything else is an [`ApiError`].
//!
//! # Architecture
//!
//! - [`ApiTransport`] - Async trait the auth session and client talk to
//! - [`HttpTransport`] - `reqwest`-backed transport honoring [`crate::HostConfig`]
//! - [`ApiResponse`] - Status-checked response body with field lookup
//! - [`xml_field`] - Field extraction from a raw response document

mod error;
#[cfg(test)]
pub(crate) mod fake;
mod transport;
mod xml;

pub use error::ApiError;
pub use transport::{ApiTransport, HttpTransport, build_api_http_client};
pub use xml::{ApiResponse, xml_field};

use std::fmt;

/// Remote API endpoints used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiAction {
    /// Fetch the per-account password salt.
    Salt,
    /// Exchange derived credentials for a session token.
    Login,
    /// Read account details (VIP flag).
    UserData,
    /// Exchange a file identifier for a direct download link.
    FileLink,
}

impl ApiAction {
    /// Path segment of the endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Salt => "salt",
            Self::Login => "login",
            Self::UserData => "user_data",
            Self::FileLink => "file_link",
        }
    }
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
