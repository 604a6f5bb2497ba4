//! Website-name validation shared by the endpoint and the terminal client.

use std::sync::LazyLock;

use regex::Regex;

use crate::CoreError;

/// Optional scheme, optional `www.`, one or more 1-63 char labels each
/// followed by a dot, then an alphabetic TLD of at least two characters.
static WEBSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?([a-zA-Z0-9-]{1,63}\.)+[a-zA-Z]{2,}$")
        .expect("valid regex")
});

/// Returns `true` if `name` looks like a website host name.
///
/// No path, query, port, or surrounding whitespace is accepted.
#[must_use]
pub fn is_valid_website(name: &str) -> bool {
    WEBSITE_RE.is_match(name)
}

/// Reduces an accepted website name to the bare host used as a fetch key.
///
/// `https://www.Microsoft.com` becomes `microsoft.com`.
#[must_use]
pub fn normalize_target(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme)
        .to_string()
}

/// Validates `raw` and returns its normalized form.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTarget`] if `raw` does not match the website pattern.
pub fn validate_target(raw: &str) -> Result<String, CoreError> {
    if is_valid_website(raw) {
        Ok(normalize_target(raw))
    } else {
        Err(CoreError::InvalidTarget {
            target: raw.to_string(),
        })
    }
}
