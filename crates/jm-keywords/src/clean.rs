//! Noise stripping ahead of tokenization.
//!
//! Emails, URLs, social profile links and bare numbers are replaced with a space so they can
//! neither become keywords nor glue neighbouring words together.

use std::sync::LazyLock;

use regex::Regex;

/// `local@domain.tld` addresses.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}._%+-]+@[\p{L}\p{N}-]+(?:\.[\p{L}\p{N}-]+)+")
        .expect("email pattern is valid")
});

/// Scheme or `www.` prefixed URLs.
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[a-z][a-z0-9+.-]*://|www\.)\S+").expect("url pattern is valid"));

/// Bare social and code-hosting profile links.
static PROFILE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[\w-]+\.)*(?:linkedin|github|gitlab|bitbucket|twitter|x|facebook|instagram|medium|stackoverflow|behance|dribbble)\.com(?:/\S*)?",
    )
    .expect("profile link pattern is valid")
});

/// Standalone digit runs.
static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("digit pattern is valid"));

/// Removes emails, URLs, profile links and standalone numbers.
pub fn strip_noise(text: &str) -> String {
    let text = EMAIL.replace_all(text, " ");
    let text = URL.replace_all(&text, " ");
    let text = PROFILE_LINK.replace_all(&text, " ");
    DIGITS.replace_all(&text, " ").into_owned()
}
