use std::sync::Arc;

use crate::app::error::Result;
use crate::config::{Config, FetchConfig};
use crate::fetcher::http_transport::HttpTransport;
use crate::fetcher::{FetchOrchestrator, TitleService, TitleSink, Transport};

pub struct AppContext {
    pub config: FetchConfig,
    pub orchestrator: Arc<FetchOrchestrator>,
    pub workers: usize,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_workers(config, config.fetch.max_concurrency)
    }

    pub fn with_workers(config: &Config, workers: usize) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.fetch)?);
        Ok(Self::with_transport(config.fetch.clone(), transport, workers))
    }

    /// Wire the pipeline around an arbitrary transport.
    pub fn with_transport(config: FetchConfig, transport: Arc<dyn Transport>, workers: usize) -> Self {
        let orchestrator = Arc::new(FetchOrchestrator::new(transport, config.clone()));

        Self {
            config,
            orchestrator,
            workers,
        }
    }

    /// A dispatcher reporting to `sink`.
    pub fn title_service<C: Send + 'static>(&self, sink: Arc<dyn TitleSink<C>>) -> TitleService<C> {
        TitleService::with_workers(self.orchestrator.clone(), sink, self.workers)
    }
}
