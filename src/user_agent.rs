//! Default User-Agent for API requests when the host supplies none.

/// Product token shared by every request this crate sends.
const PRODUCT: &str = "webshare-resolver";

/// Default User-Agent for API requests (identifies the tool and its version).
#[must_use]
pub fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version} (download-manager-plugin)")
}
