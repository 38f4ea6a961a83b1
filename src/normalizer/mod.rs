mod entities;

pub use entities::EntityDecoder;

/// Turns a raw `<title>` capture into display text.
///
/// Trims, decodes named references, decodes numeric references, then collapses
/// whitespace runs to one space. Collapsing last means whitespace produced by a
/// reference (`&#32;`, `&#10;`) is folded too.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim_matches(is_html_whitespace);
        let named = EntityDecoder::decode_named(trimmed);
        let decoded = EntityDecoder::decode_numeric(&named);
        collapse_whitespace(&decoded)
    }
}

/// ASCII whitespace including vertical tab. NBSP is content, not whitespace.
fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;

    for c in input.chars() {
        if is_html_whitespace(c) {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}
