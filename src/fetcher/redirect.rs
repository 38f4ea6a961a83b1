/// Resolves `Location` headers against the scheme and host of the request
/// that produced them.
pub struct RedirectResolver;

impl RedirectResolver {
    /// `domain` is a `scheme://host[:port]` origin.
    pub fn resolve(domain: &str, location: &str) -> String {
        let location = location.trim();

        if has_http_scheme(location) {
            return location.to_string();
        }

        if let Some(rest) = location.strip_prefix("//") {
            let scheme = domain.split_once("://").map_or("http", |(scheme, _)| scheme);
            return format!("{}://{}", scheme, rest);
        }

        match (domain.ends_with('/'), location.starts_with('/')) {
            (true, true) => format!("{}{}", domain, &location[1..]),
            (false, false) => format!("{}/{}", domain, location),
            _ => format!("{}{}", domain, location),
        }
    }
}

fn has_http_scheme(location: &str) -> bool {
    let bytes = location.as_bytes();
    let starts_with = |prefix: &[u8]| {
        bytes
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with(b"http://") || starts_with(b"https://")
}
