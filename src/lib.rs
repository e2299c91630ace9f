//! Webshare Core Library
//!
//! This library lets a download manager turn a user-supplied Webshare link into
//! a direct, authenticated download URL. It classifies the link, logs into the
//! Webshare API with the salt/token challenge, and reports either a usable URL
//! or a coded failure the host understands.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`link`] - Classification of input links (direct, file page, unsupported)
//! - [`api`] - API transport and XML response parsing
//! - [`auth`] - Salt/token session with per-instance memoization
//! - [`client`] - Public operations: [`WebshareClient::verify`] and
//!   [`WebshareClient::get_download_info`]
//! - [`config`] - Host-supplied configuration (codes, user agent, network policy)
//!
//! # Example
//!
//! ```no_run
//! use webshare_core::{DownloadOutcome, HostConfig, WebshareClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = WebshareClient::new(
//!     "https://webshare.cz/#/file/AbC123xyz/some-name",
//!     "user",
//!     "secret",
//!     HostConfig::default(),
//! )?;
//!
//! match client.get_download_info().await {
//!     DownloadOutcome::Url(url) => println!("download from {url}"),
//!     DownloadOutcome::Failed(kind) => println!("failed: {kind}"),
//! }
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod link;
pub mod outcome;
mod user_agent;

// Re-export commonly used types
pub use api::{ApiAction, ApiError, ApiTransport, HttpTransport, xml_field};
pub use auth::{AuthSession, Cached, login_digest, login_password_hash};
pub use client::WebshareClient;
pub use config::{ConfigError, CookiePolicy, HostCodes, HostConfig};
pub use link::{LinkKind, classify_link};
pub use outcome::{AccountTier, DownloadErrorKind, DownloadOutcome};
pub use user_agent::default_user_agent;
