use std::sync::Arc;

use futures::StreamExt;
use tokio::time;
use tracing::{debug, info, warn};

use crate::app::SubtitleError;
use crate::config::FetchConfig;
use crate::domain::{FetchError, Outcome};
use crate::extract::{CharsetResolver, StreamingTitleScanner};
use crate::fetcher::{BodyStream, FetchContext, HttpRequest, RedirectResolver, Transport};

/// Where one HTTP round trip leaves the fetch.
enum Step {
    Done(Outcome),
    Redirect(String),
    Retry(String),
}

/// Drives one title lookup across redirects and retries.
pub struct FetchOrchestrator {
    transport: Arc<dyn Transport>,
    config: FetchConfig,
}

impl FetchOrchestrator {
    pub fn new(transport: Arc<dyn Transport>, config: FetchConfig) -> Self {
        Self { transport, config }
    }

    /// Resolve `url` to a title.
    ///
    /// 3xx responses are followed without counting as retries, up to
    /// `max_redirects` per chain. 4xx/5xx responses, transport failures and
    /// timeouts restart from the original URL until `max_retries` is spent.
    pub async fn fetch_title(&self, url: &str) -> Outcome {
        let mut ctx = match FetchContext::new(url) {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!("Rejected {}: {}", url, e);
                return e.into();
            }
        };

        info!("Get: {}", ctx.original_url);
        let mut target = ctx.original_url.clone();

        loop {
            if let Err(e) = ctx.begin_attempt(&target) {
                warn!("Cannot follow {}: {}", target, e);
                return e.into();
            }

            match self.attempt(&mut ctx).await {
                Step::Done(outcome) => return outcome,
                Step::Redirect(location) => {
                    if ctx.redirect_count >= self.config.max_redirects {
                        warn!("Too many redirects for {}", ctx.original_url);
                        return FetchError::TooManyRedirects(ctx.redirect_count).into();
                    }
                    ctx.redirect_count += 1;
                    target = RedirectResolver::resolve(&ctx.domain, &location);
                    debug!("Redirect {} -> {}", ctx.current_url, target);
                }
                Step::Retry(reason) => {
                    if ctx.retry_count >= self.config.max_retries {
                        warn!("Giving up on {}: {}", ctx.original_url, reason);
                        return FetchError::RetriesExhausted {
                            attempts: ctx.retry_count + 1,
                            last: reason,
                        }
                        .into();
                    }
                    ctx.retry_count += 1;
                    ctx.redirect_count = 0;
                    warn!(
                        "Retrying ({}/{}): {} ({})",
                        ctx.retry_count, self.config.max_retries, ctx.original_url, reason
                    );

                    let delay = self.config.retry_backoff(ctx.retry_count);
                    if !delay.is_zero() {
                        time::sleep(delay).await;
                    }
                    target = ctx.original_url.clone();
                }
            }
        }
    }

    async fn attempt(&self, ctx: &mut FetchContext) -> Step {
        let request = HttpRequest {
            url: ctx.current_url.clone(),
            user_agent: self.config.user_agent.clone(),
            cookie: ctx.cookies.header_value(),
        };

        let timeout = self.config.request_timeout();
        let response = match time::timeout(timeout, self.transport.get(&request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("Request to {} failed: {}", request.url, e);
                return Step::Retry(e.to_string());
            }
            Err(_) => {
                warn!("Request to {} timed out", request.url);
                return Step::Retry(SubtitleError::Timeout(timeout).to_string());
            }
        };

        if let Some(charset) = response
            .header("content-type")
            .and_then(CharsetResolver::from_header)
        {
            debug!("Charset {} declared by {}", charset, request.url);
            ctx.charset = Some(charset);
        }

        for set_cookie in response.header_values("set-cookie") {
            if !ctx.cookies.store(set_cookie) {
                debug!("Skipping malformed cookie from {}: {:?}", request.url, set_cookie);
            }
        }

        match response.status {
            200..=299 => self.read_title(ctx, response.body).await,
            300..=399 => match response.header("location") {
                Some(location) => Step::Redirect(location.to_string()),
                None => Step::Done(
                    FetchError::UnexpectedResponse(format!(
                        "HTTP {} without Location from {}",
                        response.status, request.url
                    ))
                    .into(),
                ),
            },
            400..=599 => Step::Retry(format!("HTTP {}", response.status)),
            status => Step::Done(
                FetchError::UnexpectedResponse(format!("HTTP {} from {}", status, request.url))
                    .into(),
            ),
        }
    }

    async fn read_title(&self, ctx: &mut FetchContext, mut body: BodyStream) -> Step {
        let mut scanner = StreamingTitleScanner::new(self.config.body_cap_bytes);
        let timeout = self.config.request_timeout();

        loop {
            let next = match time::timeout(timeout, body.next()).await {
                Ok(next) => next,
                Err(_) => Some(Err(SubtitleError::Timeout(timeout))),
            };

            match next {
                Some(Ok(chunk)) => {
                    if let Some(title) = scanner.feed(&chunk, &mut ctx.charset) {
                        // Returning drops the body, closing the connection early
                        debug!(
                            "Title found in first {} bytes of {}",
                            scanner.buffered(),
                            ctx.current_url
                        );
                        return Step::Done(Outcome::Title(title));
                    }
                    if scanner.is_exhausted() {
                        debug!("Body cap reached for {}", ctx.current_url);
                        break;
                    }
                }
                Some(Err(e)) => {
                    warn!("Body of {} failed: {}", ctx.current_url, e);
                    return Step::Retry(e.to_string());
                }
                None => break,
            }
        }

        match scanner.finish(&mut ctx.charset) {
            Some(title) => Step::Done(Outcome::Title(title)),
            None => {
                info!("No title in {}", ctx.current_url);
                Step::Done(Outcome::NoTitle)
            }
        }
    }
}
