use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::app::{Result, SubtitleError};
use crate::config::FetchConfig;
use crate::fetcher::{HttpRequest, HttpResponse, Transport};

/// reqwest-backed transport. Redirects and cookies are left to the orchestrator.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.request_timeout())
            .read_timeout(config.request_timeout())
            .gzip(true)
            .brotli(true)
            .redirect(Policy::none())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = url::Url::parse(&request.url)?;
        let mut builder = self
            .client
            .get(url)
            .header(USER_AGENT, request.user_agent.as_str());

        if let Some(cookie) = &request.cookie {
            builder = builder.header(COOKIE, cookie.as_str());
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = stream::try_unfold(response, |mut response| async move {
            let chunk = response.chunk().await?;
            Ok::<_, SubtitleError>(chunk.map(|bytes| (bytes.to_vec(), response)))
        })
        .boxed();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
