use std::sync::LazyLock;

use regex::Regex;

/// Matches a JSONP-style `callback(...)` wrapper around a response body.
///
/// The callback name may not start with a JSON opening token, so plain
/// objects, arrays and strings never match.
const CALLBACK_WRAPPER_PATTERN: &str = r#"(?s)^\s*[^\s(\[{"]+\((.*)\)\s*;?\s*$"#;
static CALLBACK_WRAPPER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CALLBACK_WRAPPER_PATTERN).expect("Invalid regex pattern"));

pub fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .gzip(true)
        .brotli(true)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Strip a `callback(` prefix and `)` suffix from a body, if present.
pub fn strip_callback(body: &str) -> &str {
    CALLBACK_WRAPPER_REGEX
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map_or(body, |inner| inner.as_str())
}
