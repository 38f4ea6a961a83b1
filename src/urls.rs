use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("url pattern"));

/// Finds http(s) URLs in free text such as a chat message.
#[derive(Clone, Copy, Debug, Default)]
pub struct UrlExtractor;

impl UrlExtractor {
    pub fn new() -> Self {
        Self
    }

    /// URLs in order of appearance.
    pub fn extract(&self, text: &str) -> Vec<String> {
        URL.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}
