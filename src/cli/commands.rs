use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app::{AppContext, Result, SubtitleError};
use crate::domain::Outcome;
use crate::fetcher::TitleSink;
use crate::urls::UrlExtractor;

/// Chat-style rendering of a title.
pub fn format_title(title: &str) -> String {
    format!("[ {} ]", title)
}

pub async fn get_titles(ctx: &AppContext, urls: &[String]) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let sink: Arc<dyn TitleSink<usize>> = Arc::new(tx);
    let service = ctx.title_service(sink);

    for (index, url) in urls.iter().enumerate() {
        service.start_fetch(url.as_str(), index);
    }
    // The receiver closes once every fetch has reported
    drop(service);

    let mut outcomes: Vec<Option<Outcome>> = vec![None; urls.len()];
    while let Some((outcome, index)) = rx.recv().await {
        outcomes[index] = Some(outcome);
    }

    let mut errors = 0;
    for (url, outcome) in urls.iter().zip(outcomes) {
        match outcome {
            Some(Outcome::Title(title)) => println!("{}", format_title(&title)),
            Some(Outcome::NoTitle) => info!("No title for {}", url),
            Some(Outcome::Error(e)) => {
                errors += 1;
                eprintln!("  Error fetching {}: {}", url, e);
            }
            None => warn!("No result for {}", url),
        }
    }

    debug!("{} URLs looked up, {} errors", urls.len(), errors);
    Ok(())
}

pub async fn watch(ctx: &AppContext) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<(Outcome, usize)>();

    let printer = tokio::spawn(async move {
        while let Some((outcome, line)) = rx.recv().await {
            match outcome {
                Outcome::Title(title) => println!("{} {}", line, format_title(&title)),
                Outcome::NoTitle => debug!("No title for a URL on line {}", line),
                Outcome::Error(e) => warn!("Line {}: {}", line, e),
            }
        }
    });

    let sink: Arc<dyn TitleSink<usize>> = Arc::new(tx);
    let service = ctx.title_service(sink);
    let extractor = UrlExtractor::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        for url in extractor.extract(&line) {
            service.start_fetch(url, line_no);
        }
    }
    drop(service);

    printer
        .await
        .map_err(|e| SubtitleError::Other(format!("Printer task failed: {}", e)))
}
