use url::Url;

use crate::domain::FetchError;
use crate::fetcher::cookies::CookieJar;

/// State owned by one logical fetch and threaded through all of its
/// redirects and retries.
#[derive(Debug, Clone)]
pub struct FetchContext {
    /// Retries always restart from here.
    pub original_url: String,
    pub current_url: String,
    /// `scheme://host[:port]` of `current_url`; relative redirects resolve against it.
    pub domain: String,
    pub cookies: CookieJar,
    pub charset: Option<String>,
    pub retry_count: u32,
    /// Redirects followed since the chain last started from `original_url`.
    pub redirect_count: u32,
}

impl FetchContext {
    pub fn new(url: &str) -> Result<Self, FetchError> {
        let url = strip_non_printable(url);
        let domain = domain_of(&url)?;

        Ok(Self {
            original_url: url.clone(),
            current_url: url,
            domain,
            cookies: CookieJar::new(),
            charset: None,
            retry_count: 0,
            redirect_count: 0,
        })
    }

    /// Point the context at the next request of the chain.
    pub fn begin_attempt(&mut self, url: &str) -> Result<(), FetchError> {
        let url = strip_non_printable(url);
        self.domain = domain_of(&url)?;
        self.current_url = url;
        Ok(())
    }
}

/// Drops every character at or below U+001F.
pub fn strip_non_printable(input: &str) -> String {
    input.chars().filter(|&c| u32::from(c) > 31).collect()
}

/// `scheme://host[:port]` of an http(s) URL.
pub fn domain_of(url: &str) -> Result<String, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            url,
            parsed.scheme()
        )));
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(FetchError::InvalidUrl(format!("{}: missing host", url)));
    }

    Ok(parsed.origin().ascii_serialization())
}
