//! HTTP transport for API calls.
//!
//! Centralizes the request policy: form-encoded POST, JSON `Accept` hint,
//! host user agent, fixed timeout, redirect following and a cookie store
//! that belongs to this transport alone.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};

use crate::config::{CookiePolicy, HostConfig};

use super::{ApiAction, ApiError, ApiResponse};

const MAX_REDIRECTS: usize = 10;
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Issues one API call and returns the status-checked response.
///
/// # Object Safety
///
/// This trait uses `async_trait` so the auth session can take
/// `&dyn ApiTransport` and tests can substitute recording fakes.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// POSTs `fields` to the endpoint for `action`.
    ///
    /// Implementations must never panic on network or parse failures; every
    /// such failure is reported as an [`ApiError`].
    async fn request(
        &self,
        action: ApiAction,
        fields: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError>;
}

/// `reqwest`-backed transport talking to the configured API base URL.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport using the host configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(config: &HostConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_api_http_client(config)?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full endpoint URL for an action, e.g. `https://webshare.cz/api/salt/`.
    #[must_use]
    pub fn endpoint(&self, action: ApiAction) -> String {
        format!("{}/{}/", self.base_url, action.as_str())
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    #[tracing::instrument(skip(self, form), fields(action = %action))]
    async fn request(
        &self,
        action: ApiAction,
        form: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();

        let response = self
            .client
            .post(self.endpoint(action))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|error| ApiError::transport(action, &error))?;

        // The API reports failures in the body; the HTTP status is informational.
        let http_status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|error| ApiError::transport(action, &error))?;

        let result = ApiResponse::parse(action, text);
        match &result {
            Ok(_) => debug!(http_status, "API call succeeded"),
            Err(error) => debug!(http_status, error = %error, "API call failed"),
        }
        result
    }
}

/// Builds the HTTP client used for API calls.
///
/// # Errors
///
/// Returns [`ApiError::ClientBuild`] when client construction fails.
pub fn build_api_http_client(config: &HostConfig) -> Result<Client, ApiError> {
    base_builder(config)
        .build()
        .map_err(|error| ApiError::ClientBuild {
            reason: error.to_string(),
        })
}

fn base_builder(config: &HostConfig) -> ClientBuilder {
    let mut builder = Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true);

    if config.accept_invalid_certs {
        warn!("TLS certificate verification is disabled for API requests");
        builder = builder.danger_accept_invalid_certs(true);
    }

    match config.cookies {
        CookiePolicy::Isolated => builder.cookie_provider(Arc::new(Jar::default())),
        CookiePolicy::Disabled => builder,
    }
}
