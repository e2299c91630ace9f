//! The client a host instantiates once per request.
//!
//! [`WebshareClient::verify`] reports the account tier and
//! [`WebshareClient::get_download_info`] turns the link into a direct URL.
//! Neither lets a transport or parse error escape: every failure is mapped to
//! an [`AccountTier`] or a [`DownloadErrorKind`] before returning.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiAction, ApiError, ApiTransport, HttpTransport};
use crate::auth::AuthSession;
use crate::config::{HostCodes, HostConfig};
use crate::link::{LinkKind, classify_link};
use crate::outcome::{AccountTier, DownloadErrorKind, DownloadOutcome};

const VIP_FIELD: &str = "vip";
const LINK_FIELD: &str = "link";

/// Failure signal threaded through [`WebshareClient::get_download_info`].
#[derive(Debug, Error)]
enum DownloadError {
    #[error("link '{input}' is not a Webshare file page or direct link")]
    UnsupportedLink { input: String },

    #[error("login failed; no token for file lookup")]
    LoginFailed,

    #[error("no download link for file '{ident}': {source}")]
    FileNotFound { ident: String, source: ApiError },
}

impl DownloadError {
    fn kind(&self) -> DownloadErrorKind {
        match self {
            Self::UnsupportedLink { .. } => DownloadErrorKind::UnsupportedLink,
            Self::LoginFailed => DownloadErrorKind::LoginFailed,
            Self::FileNotFound { .. } => DownloadErrorKind::FileNotFound,
        }
    }
}

/// Resolves one link for one account.
///
/// Salt and token are memoized per instance; `user_data` and `file_link` are
/// requested afresh on every call.
pub struct WebshareClient<T: ApiTransport = HttpTransport> {
    url: String,
    session: AuthSession,
    codes: HostCodes,
    transport: T,
}

impl WebshareClient<HttpTransport> {
    /// Creates a client talking to the API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        config: HostConfig,
    ) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(
            url,
            username,
            password,
            config.codes,
            transport,
        ))
    }
}

impl<T: ApiTransport> WebshareClient<T> {
    /// Creates a client on top of an existing transport.
    #[must_use]
    pub fn with_transport(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        codes: HostCodes,
        transport: T,
    ) -> Self {
        Self {
            url: url.into(),
            session: AuthSession::new(username, password),
            codes,
            transport,
        }
    }

    /// Host codes used to report outcomes.
    #[must_use]
    pub fn host_codes(&self) -> &HostCodes {
        &self.codes
    }

    /// The authentication session (salt/token cache).
    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Logs in and reports whether the account has VIP.
    #[tracing::instrument(skip(self), fields(username = %self.session.username()))]
    pub async fn verify(&mut self) -> AccountTier {
        if self.session.resolve_salt(&self.transport).await.is_none() {
            return AccountTier::LoginFailed;
        }
        let Some(token) = self.session.resolve_token(&self.transport).await else {
            return AccountTier::LoginFailed;
        };

        let vip = match self
            .transport
            .request(ApiAction::UserData, &[("wst", token.as_str())])
            .await
        {
            Ok(response) => response.field(VIP_FIELD),
            Err(error) => {
                warn!(error = %error, "User data unavailable; assuming free account");
                None
            }
        };

        let tier = if is_vip(vip.as_deref()) {
            AccountTier::Premium
        } else {
            AccountTier::Free
        };
        info!(tier = %tier, "Account verified");
        tier
    }

    /// Resolves the link into a direct download URL.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn get_download_info(&mut self) -> DownloadOutcome {
        match self.resolve_download().await {
            Ok(url) => {
                info!(download_url = %url, "Download link resolved");
                DownloadOutcome::Url(url)
            }
            Err(error) => {
                warn!(error = %error, "Download link not resolved");
                DownloadOutcome::Failed(error.kind())
            }
        }
    }

    async fn resolve_download(&mut self) -> Result<String, DownloadError> {
        let ident = match classify_link(&self.url) {
            LinkKind::Direct(url) => {
                debug!("Link is already direct");
                return Ok(url);
            }
            LinkKind::FilePage { ident } => ident,
            LinkKind::Unsupported => {
                return Err(DownloadError::UnsupportedLink {
                    input: self.url.clone(),
                });
            }
        };

        let token = self
            .session
            .resolve_token(&self.transport)
            .await
            .ok_or(DownloadError::LoginFailed)?;

        let link = self
            .transport
            .request(
                ApiAction::FileLink,
                &[("wst", token.as_str()), ("ident", ident.as_str())],
            )
            .await
            .and_then(|response| response.require(LINK_FIELD));

        link.map_err(|source| DownloadError::FileNotFound { ident, source })
    }
}

/// `vip` is an integer flag; only `1` means VIP.
fn is_vip(value: Option<&str>) -> bool {
    value.and_then(|v| v.trim().parse::<i64>().ok()) == Some(1)
}

impl<T: ApiTransport> std::fmt::Debug for WebshareClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebshareClient")
            .field("url", &self.url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
