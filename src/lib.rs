//! # Subtitle
//!
//! Fetches web pages and reports their `<title>`, the way a chat bot announces
//! links pasted into a channel.
//!
//! ## Architecture
//!
//! ```text
//! URL → TitleService → FetchOrchestrator ⇄ Transport
//!                            ↓ body chunks
//!                      StreamingTitleScanner → TextNormalizer → TitleSink
//! ```
//!
//! - [`fetcher`]: redirects, retries, cookies and the HTTP transport
//! - [`extract`]: incremental title search and charset handling
//! - [`normalizer`]: entity decoding and whitespace cleanup
//!
//! ## Quick Start
//!
//! ```bash
//! # Look up titles
//! subtitle get https://www.rust-lang.org/
//!
//! # Announce titles of URLs mentioned on stdin
//! tail -f channel.log | subtitle watch
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: TOML configuration
//! - [`domain`]: Fetch outcomes
//! - [`urls`]: URL discovery in free text

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the transport, orchestrator and
/// dispatcher together from a [`Config`](config::Config).
pub mod app;

/// Command-line interface using clap.
///
/// - `get <url>...` - Print the title of each URL
/// - `watch` - Print titles for URLs found in lines read from stdin
pub mod cli;

/// Configuration loaded from `~/.config/subtitle/config.toml`.
pub mod config;

/// Outcome of a fetch: a title, no title, or an error.
pub mod domain;

/// Title extraction from response bodies.
///
/// - [`StreamingTitleScanner`](extract::StreamingTitleScanner): bounded incremental search
/// - [`CharsetResolver`](extract::CharsetResolver): header/meta charset and decoding
pub mod extract;

/// Fetching across redirects and retries.
///
/// - [`FetchOrchestrator`](fetcher::FetchOrchestrator): one logical fetch
/// - [`TitleService`](fetcher::TitleService): concurrent fetches reporting to a sink
/// - [`Transport`](fetcher::Transport): async trait for issuing requests
/// - [`HttpTransport`](fetcher::http_transport::HttpTransport): reqwest-based implementation
pub mod fetcher;

/// HTML entity decoding and whitespace normalization.
pub mod normalizer;

/// URL discovery in free text.
pub mod urls;
