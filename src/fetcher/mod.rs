pub mod context;
pub mod cookies;
pub mod http_transport;
pub mod orchestrator;
pub mod redirect;
pub mod service;

pub use context::FetchContext;
pub use cookies::CookieJar;
pub use orchestrator::FetchOrchestrator;
pub use redirect::RedirectResolver;
pub use service::{FnSink, TitleService, TitleSink};

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::app::Result;

/// Response body as it arrives off the wire. Dropping it abandons the transfer.
pub type BodyStream = BoxStream<'static, Result<Vec<u8>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub user_agent: String,
    /// Serialized jar for the `Cookie` header
    pub cookie: Option<String>,
}

pub struct HttpResponse {
    pub status: u16,
    /// In arrival order; repeated headers appear once per occurrence
    pub headers: Vec<(String, String)>,
    pub body: BodyStream,
}

impl HttpResponse {
    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Every value of a possibly repeated header such as `Set-Cookie`.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Issues a single GET without following redirects.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse>;
}
