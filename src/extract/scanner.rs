use std::sync::LazyLock;

use regex::bytes::Regex;
use tracing::debug;

use crate::extract::CharsetResolver;
use crate::normalizer::TextNormalizer;

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is-u)<title(?:\s[^>]*)?>(.*?)</title\s*>").expect("title pattern")
});

static TITLE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)<title(?:\s[^>]*)?>").expect("title open pattern"));

/// Incremental `<title>` search over a response body.
///
/// Only the first `capacity` bytes are ever buffered. Tags may straddle chunk
/// boundaries, so each search resumes from the earliest offset where a tag
/// could still be completed rather than from the new chunk. A title is
/// returned at most once per scanner.
pub struct StreamingTitleScanner {
    buffer: Vec<u8>,
    remaining: usize,
    title_emitted: bool,
    title_from: usize,
    meta_from: usize,
    normalizer: TextNormalizer,
}

impl StreamingTitleScanner {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity.min(64 * 1024)),
            remaining: capacity,
            title_emitted: false,
            title_from: 0,
            meta_from: 0,
            normalizer: TextNormalizer::new(),
        }
    }

    /// Append a chunk and search again.
    ///
    /// A `<meta>` charset found in the body is written to `charset` only if no
    /// charset is known yet.
    pub fn feed(&mut self, chunk: &[u8], charset: &mut Option<String>) -> Option<String> {
        let take = chunk.len().min(self.remaining);
        if take == 0 {
            return None;
        }

        self.buffer.extend_from_slice(&chunk[..take]);
        self.remaining -= take;
        self.scan(charset)
    }

    /// Final search once the body has ended.
    pub fn finish(&mut self, charset: &mut Option<String>) -> Option<String> {
        self.scan(charset)
    }

    /// No further bytes will be accepted.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn scan(&mut self, charset: &mut Option<String>) -> Option<String> {
        if self.title_emitted {
            return None;
        }

        if charset.is_none() {
            match CharsetResolver::from_meta(&self.buffer[self.meta_from..]) {
                Some(found) => {
                    debug!("Charset {} declared in body", found);
                    *charset = Some(found);
                }
                None => self.meta_from = resume_point(&self.buffer, self.meta_from),
            }
        }

        loop {
            let region = &self.buffer[self.title_from..];
            let Some(caps) = TITLE.captures(region) else {
                // Wait at the open tag until its close arrives
                self.title_from = match TITLE_OPEN.find(region) {
                    Some(open) => self.title_from + open.start(),
                    None => resume_point(&self.buffer, self.title_from),
                };
                return None;
            };

            let end = caps.get(0).map_or(region.len(), |m| m.end());
            let raw = CharsetResolver::decode(&caps[1], charset.as_deref());
            let title = self.normalizer.normalize(&raw);

            if !title.is_empty() {
                self.title_emitted = true;
                return Some(title);
            }
            self.title_from += end;
        }
    }
}

/// Earliest offset at or after `from` where a tag that has not fully arrived
/// could begin: the first `<` after the last `>`.
fn resume_point(buffer: &[u8], from: usize) -> usize {
    let tail = &buffer[from..];
    let after_close = tail.iter().rposition(|&b| b == b'>').map_or(0, |i| i + 1);

    match tail[after_close..].iter().position(|&b| b == b'<') {
        Some(i) => from + after_close + i,
        None => buffer.len(),
    }
}
