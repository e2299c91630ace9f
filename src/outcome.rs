//! Results handed back to the host.

use std::fmt;

use crate::config::HostCodes;

/// Outcome of [`crate::WebshareClient::verify`]. Recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountTier {
    /// Salt or login failed.
    LoginFailed,
    /// Logged in, no VIP.
    Free,
    /// Logged in with VIP.
    Premium,
}

impl AccountTier {
    /// Maps the tier to the host's integer code.
    #[must_use]
    pub fn host_code(self, codes: &HostCodes) -> i32 {
        match self {
            Self::LoginFailed => codes.login_failed,
            Self::Free => codes.user_free,
            Self::Premium => codes.user_premium,
        }
    }
}

impl fmt::Display for AccountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoginFailed => "login failed",
            Self::Free => "free",
            Self::Premium => "premium",
        })
    }
}

/// Why [`crate::WebshareClient::get_download_info`] produced no URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadErrorKind {
    /// The link is not a Webshare file page or direct link.
    UnsupportedLink,
    /// The API returned no link for the identifier.
    FileNotFound,
    /// Salt or login failed.
    LoginFailed,
}

impl DownloadErrorKind {
    /// Maps the failure to the host's integer code.
    #[must_use]
    pub fn host_code(self, codes: &HostCodes) -> i32 {
        match self {
            Self::UnsupportedLink => codes.unsupported_link,
            Self::FileNotFound => codes.file_not_found,
            Self::LoginFailed => codes.login_failed,
        }
    }
}

impl fmt::Display for DownloadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnsupportedLink => "unsupported link format",
            Self::FileNotFound => "file not found",
            Self::LoginFailed => "login failed",
        })
    }
}

/// Tagged result of resolving a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Direct download URL.
    Url(String),
    /// Coded failure.
    Failed(DownloadErrorKind),
}

impl DownloadOutcome {
    /// The download URL, if resolution succeeded.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Failed(_) => None,
        }
    }

    /// The failure kind, if resolution failed.
    #[must_use]
    pub fn error(&self) -> Option<DownloadErrorKind> {
        match self {
            Self::Url(_) => None,
            Self::Failed(kind) => Some(*kind),
        }
    }
}
