use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::domain::{FetchError, Outcome};
use crate::fetcher::FetchOrchestrator;

/// Receives the single outcome of each started fetch along with the caller's
/// context, which is passed through untouched.
pub trait TitleSink<C>: Send + Sync {
    fn on_result(&self, outcome: Outcome, context: C);
}

impl<C: Send> TitleSink<C> for mpsc::UnboundedSender<(Outcome, C)> {
    fn on_result(&self, outcome: Outcome, context: C) {
        if self.send((outcome, context)).is_err() {
            warn!("Title receiver dropped; discarding result");
        }
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<C, F> TitleSink<C> for FnSink<F>
where
    F: Fn(Outcome, C) + Send + Sync,
{
    fn on_result(&self, outcome: Outcome, context: C) {
        (self.0)(outcome, context)
    }
}

/// Runs fetches concurrently, at most `workers` at a time, each reporting to
/// the sink exactly once.
pub struct TitleService<C> {
    orchestrator: Arc<FetchOrchestrator>,
    sink: Arc<dyn TitleSink<C>>,
    semaphore: Arc<Semaphore>,
}

impl<C: Send + 'static> TitleService<C> {
    pub fn with_workers(
        orchestrator: Arc<FetchOrchestrator>,
        sink: Arc<dyn TitleSink<C>>,
        workers: usize,
    ) -> Self {
        Self {
            orchestrator,
            sink,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Begin looking up the title of `url`. The returned handle completes once
    /// the sink has been called.
    pub fn start_fetch(&self, url: impl Into<String>, context: C) -> JoinHandle<()> {
        let url = url.into();
        let orchestrator = self.orchestrator.clone();
        let semaphore = self.semaphore.clone();
        let sink = self.sink.clone();

        tokio::spawn(async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => orchestrator.fetch_title(&url).await,
                Err(e) => FetchError::Transport(format!("Fetch queue closed: {}", e)).into(),
            };
            sink.on_result(outcome, context);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::config::FetchConfig;
    use crate::fetcher::orchestrator::tests::{page, ScriptedTransport};

    fn orchestrator(transport: Arc<ScriptedTransport>) -> Arc<FetchOrchestrator> {
        let config = FetchConfig {
            max_retries: 0,
            retry_backoff_ms: 0,
            ..Default::default()
        };
        Arc::new(FetchOrchestrator::new(transport, config))
    }

    #[tokio::test]
    async fn test_context_is_passed_through() {
        let transport = ScriptedTransport::new(vec![page(200, &[], b"<title>One</title>")]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink: Arc<dyn TitleSink<(&str, u32)>> = Arc::new(tx);
        let service = TitleService::with_workers(orchestrator(transport), sink, 4);

        service.start_fetch("http://x.com/", ("#rust", 42)).await.unwrap();

        let (outcome, context) = rx.recv().await.unwrap();
        assert_eq!(outcome, Outcome::Title("One".into()));
        assert_eq!(context, ("#rust", 42));
    }

    #[tokio::test]
    async fn test_every_fetch_reports_exactly_once() {
        let transport = ScriptedTransport::new(vec![
            page(200, &[], b"<title>A</title>"),
            page(200, &[], b"<p>none</p>"),
            page(404, &[], b""),
        ]);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink: Arc<dyn TitleSink<usize>> = {
            let calls = calls.clone();
            let seen = seen.clone();
            Arc::new(FnSink(move |outcome: Outcome, id: usize| {
                calls.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push((id, outcome));
            }))
        };
        let service = TitleService::with_workers(orchestrator(transport), sink, 1);

        let handles: Vec<_> = (0..3)
            .map(|id| service.start_fetch(format!("http://x.com/{}", id), id))
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.iter().filter(|(_, o)| o.title().is_some()).count(), 1);
        assert_eq!(seen.iter().filter(|(_, o)| *o == Outcome::NoTitle).count(), 1);
        assert_eq!(seen.iter().filter(|(_, o)| o.is_error()).count(), 1);
    }

    #[test]
    fn test_invalid_url_reported_through_sink() {
        let transport = ScriptedTransport::new(vec![]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink: Arc<dyn TitleSink<&str>> = Arc::new(tx);

        let (outcome, context) = tokio_test::block_on(async {
            let service = TitleService::with_workers(orchestrator(transport), sink, 4);
            service.start_fetch("not a url", "ctx").await.unwrap();
            rx.recv().await.unwrap()
        });

        assert!(outcome.is_error());
        assert_eq!(context, "ctx");
    }
}
