//! Classification of user-supplied Webshare links.
//!
//! A link is either already a direct download URL on one of the numbered VIP
//! download hosts, a file page carrying an identifier that must be exchanged
//! for a direct URL, or something this crate does not understand.

use std::sync::LazyLock;

use regex::Regex;

/// Direct links served by numbered download hosts, e.g. `https://vip.3.dl.webshare.cz/...`.
static DIRECT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)^https?://vip\.\d+\.dl\.webshare\.cz/"));

/// File pages, both the classic and the `#/` router flavour, on the main or beta host.
static FILE_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r"(?i)^https?://(?:beta\.)?webshare\.cz(?:/#/|/#|#/|/|#)file/([A-Za-z0-9_]+)(?:/.*)?$",
    )
});

/// Compiles a regex at static init; panics on invalid pattern.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// The shape of an input link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Already a direct download URL (trimmed input); no API call is needed.
    Direct(String),
    /// A file page; the identifier must be exchanged for a direct URL.
    FilePage {
        /// Opaque file identifier captured from the page URL.
        ident: String,
    },
    /// Neither a direct link nor a file page.
    Unsupported,
}

/// Classifies a raw link. Pure and infallible: unknown input is [`LinkKind::Unsupported`].
#[must_use]
pub fn classify_link(input: &str) -> LinkKind {
    let trimmed = input.trim();

    if DIRECT_LINK_RE.is_match(trimmed) {
        return LinkKind::Direct(trimmed.to_string());
    }

    FILE_PAGE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(LinkKind::Unsupported, |ident| LinkKind::FilePage {
            ident: ident.as_str().to_string(),
        })
}
