//! Derivation of the credentials sent to the `login` endpoint.
//!
//! - `password`: SHA-1 hex of the MD5-crypt hash of the password, keyed by the
//!   salt the API issued (`$1$<salt>$`).
//! - `digest`: MD5 hex of `<username>:Webshare:<password>`.

use sha1::{Digest, Sha1};
use thiserror::Error;

/// Realm embedded in the login digest.
const DIGEST_REALM: &str = "Webshare";

/// The salt issued by the API is not usable as an MD5-crypt setting.
#[derive(Debug, Clone, Error)]
#[error("salt rejected by MD5-crypt: {reason}")]
pub struct SaltError {
    reason: String,
}

/// Computes the `password` field for `login`.
///
/// # Errors
///
/// Returns [`SaltError`] when the salt cannot be used as an MD5-crypt setting.
/// Only the crypt alphabet `[./0-9A-Za-z]` is accepted; at most eight salt
/// characters are used.
// The login endpoint expects MD5-crypt; pwhash marks it deprecated as a password store.
#[allow(deprecated)]
pub fn login_password_hash(password: &str, salt: &str) -> Result<String, SaltError> {
    let setting = format!("$1${salt}$");
    let crypted = pwhash::md5_crypt::hash_with(setting.as_str(), password)
        .map_err(|e| SaltError {
            reason: e.to_string(),
        })?;
    Ok(hex::encode(Sha1::digest(crypted.as_bytes())))
}

/// Computes the `digest` field for `login`.
#[must_use]
pub fn login_digest(username: &str, password: &str) -> String {
    format!(
        "{:x}",
        md5::compute(format!("{username}:{DIGEST_REALM}:{password}"))
    )
}
