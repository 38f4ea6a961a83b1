use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::bytes::Regex as BytesRegex;
use regex::Regex;

static HEADER_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^\s;"']+)"#).expect("header charset pattern")
});

// Covers both `<meta http-equiv="Content-Type" content="text/html; charset=X">`
// and `<meta charset="X">`. The label only counts once its terminator has
// arrived, so a label cut off at the end of the buffer is never taken.
static META_CHARSET: LazyLock<BytesRegex> = LazyLock::new(|| {
    BytesRegex::new(r#"(?i-u)<meta\s[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_.:\-]+)["'\s;/>]"#)
        .expect("meta charset pattern")
});

/// Picks the charset a title should be decoded with.
pub struct CharsetResolver;

impl CharsetResolver {
    /// `charset=` parameter of a `Content-Type` header value.
    pub fn from_header(value: &str) -> Option<String> {
        HEADER_CHARSET
            .captures(value)
            .map(|caps| caps[1].to_string())
    }

    /// Charset declared by a `<meta>` tag somewhere in `body`.
    pub fn from_meta(body: &[u8]) -> Option<String> {
        META_CHARSET
            .captures(body)
            .map(|caps| String::from_utf8_lossy(&caps[1]).into_owned())
    }

    /// Decode `bytes` as `charset`, falling back to lossy UTF-8 when the
    /// charset is absent or unknown.
    pub fn decode(bytes: &[u8], charset: Option<&str>) -> String {
        let encoding = charset
            .filter(|label| !is_utf8_label(label))
            .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
            .map(Encoding::output_encoding);

        match encoding {
            Some(encoding) => encoding.decode_without_bom_handling(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

fn is_utf8_label(label: &str) -> bool {
    let label = label.trim();
    label.eq_ignore_ascii_case("utf-8") || label.eq_ignore_ascii_case("utf8")
}
