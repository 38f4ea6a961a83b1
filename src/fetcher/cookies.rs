/// Cookies gathered over one fetch, in first-seen order.
///
/// A later `Set-Cookie` for the same name overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<(String, String)>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `Set-Cookie` header value. Only the leading `name=value`
    /// pair is kept; attributes are ignored. Returns false if the header was
    /// skipped as malformed.
    pub fn store(&mut self, set_cookie: &str) -> bool {
        match parse_set_cookie(set_cookie) {
            Some((name, value)) => {
                self.insert(name, value);
                true
            }
            None => false,
        }
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        match self.cookies.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.cookies.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// `k1=v1; k2=v2; `
    pub fn serialize(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}; ", name, value))
            .collect()
    }

    /// Value for an outgoing `Cookie` header, if there is anything to send.
    pub fn header_value(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.serialize())
    }
}

fn parse_set_cookie(header: &str) -> Option<(&str, &str)> {
    let pair = header.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();

    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }

    Some((name, value.trim()))
}
