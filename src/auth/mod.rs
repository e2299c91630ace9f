//! Salt/token authentication with per-instance memoization.
//!
//! Logging in takes two calls: `salt` returns a per-account salt, then `login`
//! exchanges credentials derived from it for a token. Each outcome, success or
//! failure, is cached for the lifetime of the [`AuthSession`] so neither call
//! is ever issued twice by the same session. Nothing outlives the session.

mod credentials;

pub use credentials::{SaltError, login_digest, login_password_hash};

use std::fmt;

use tracing::{debug, warn};

use crate::api::{ApiAction, ApiTransport};

const SALT_FIELD: &str = "salt";
const TOKEN_FIELD: &str = "token";

/// A value fetched at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cached<T> {
    /// Not fetched yet.
    #[default]
    Unresolved,
    /// Fetch attempted and failed; never retried.
    Failed,
    /// Fetched successfully.
    Value(T),
}

impl<T> Cached<T> {
    /// True once a fetch has been attempted.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// The cached value, if the fetch succeeded.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unresolved | Self::Failed => None,
        }
    }

    /// Settled outcome: `None` while unresolved, `Some(None)` after a failure.
    fn settled(&self) -> Option<Option<&T>> {
        match self {
            Self::Unresolved => None,
            Self::Failed => Some(None),
            Self::Value(value) => Some(Some(value)),
        }
    }
}

impl<T> From<Option<T>> for Cached<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Failed, Self::Value)
    }
}

/// Credentials plus the memoized salt and token of one client instance.
pub struct AuthSession {
    username: String,
    password: String,
    salt: Cached<String>,
    token: Cached<String>,
}

impl AuthSession {
    /// Creates a session with nothing fetched yet.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            salt: Cached::Unresolved,
            token: Cached::Unresolved,
        }
    }

    /// Account name sent as `username_or_email`.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Current salt cache state.
    #[must_use]
    pub fn salt(&self) -> &Cached<String> {
        &self.salt
    }

    /// Current token cache state.
    #[must_use]
    pub fn token(&self) -> &Cached<String> {
        &self.token
    }

    /// Returns the salt, calling `salt` only if no attempt was made before.
    pub async fn resolve_salt<T>(&mut self, transport: &T) -> Option<String>
    where
        T: ApiTransport + ?Sized,
    {
        if let Some(cached) = self.salt.settled() {
            return cached.cloned();
        }

        let fetched = match transport
            .request(
                ApiAction::Salt,
                &[("username_or_email", self.username.as_str())],
            )
            .await
            .and_then(|response| response.require(SALT_FIELD))
        {
            Ok(salt) => {
                debug!(username = %self.username, "Salt resolved");
                Some(salt)
            }
            Err(error) => {
                warn!(username = %self.username, error = %error, "Salt could not be loaded");
                None
            }
        };

        self.salt = Cached::from(fetched.clone());
        fetched
    }

    /// Returns the token, logging in only if no attempt was made before.
    ///
    /// Without a salt the login call is skipped and the failure is cached.
    pub async fn resolve_token<T>(&mut self, transport: &T) -> Option<String>
    where
        T: ApiTransport + ?Sized,
    {
        if let Some(cached) = self.token.settled() {
            return cached.cloned();
        }

        let Some(salt) = self.resolve_salt(transport).await else {
            self.token = Cached::Failed;
            return None;
        };

        let fetched = self.login(transport, &salt).await;
        self.token = Cached::from(fetched.clone());
        fetched
    }

    async fn login<T>(&self, transport: &T, salt: &str) -> Option<String>
    where
        T: ApiTransport + ?Sized,
    {
        let password_hash = match login_password_hash(&self.password, salt) {
            Ok(hash) => hash,
            Err(error) => {
                warn!(username = %self.username, error = %error, "Password hashing failed");
                return None;
            }
        };
        let digest = login_digest(&self.username, &self.password);

        let result = transport
            .request(
                ApiAction::Login,
                &[
                    ("username_or_email", self.username.as_str()),
                    ("password", password_hash.as_str()),
                    ("digest", digest.as_str()),
                ],
            )
            .await
            .and_then(|response| response.require(TOKEN_FIELD));

        match result {
            Ok(token) => {
                debug!(username = %self.username, "Logged in");
                Some(token)
            }
            Err(error) => {
                warn!(username = %self.username, error = %error, "User could not be logged in");
                None
            }
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("salt_resolved", &self.salt.is_resolved())
            .field("token_resolved", &self.token.is_resolved())
            .finish()
    }
}
