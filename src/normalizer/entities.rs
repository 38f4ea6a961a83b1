use std::borrow::Cow;
use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::{Captures, Regex};

static NAMED_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(\w+?);").expect("named entity pattern"));

static NUMERIC_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(?:([0-9]+)|[xX]([0-9A-Fa-f]+));").expect("numeric entity pattern")
});

/// Decodes HTML character references. Anything it does not recognise is left as written.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntityDecoder;

impl EntityDecoder {
    /// `&amp;` style references, looked up in the HTML5 entity table.
    pub fn decode_named(input: &str) -> Cow<'_, str> {
        NAMED_ENTITY.replace_all(input, |caps: &Captures| {
            let reference = &caps[0];
            let decoded = decode_html_entities(reference);
            // Only a prefix was recognised (e.g. `&ampx;`), or nothing at all
            if decoded == reference || (decoded.len() > 1 && decoded.ends_with(';')) {
                reference.to_string()
            } else {
                decoded.into_owned()
            }
        })
    }

    /// `&#NNN;` and `&#xHH;` references.
    pub fn decode_numeric(input: &str) -> Cow<'_, str> {
        NUMERIC_ENTITY.replace_all(input, |caps: &Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(dec), _) => dec.as_str().parse::<u32>().ok(),
                (None, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
                _ => None,
            };

            code.and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
    }

    /// Named references first, then numeric ones.
    pub fn decode(input: &str) -> String {
        let named = Self::decode_named(input);
        Self::decode_numeric(&named).into_owned()
    }
}
