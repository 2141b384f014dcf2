//! Batch collection of citation locations.
//!
//! A list of citations is split into contiguous chunks, one per worker. Each
//! worker fetches its pages in turn, trims them to content, standardizes the
//! text and locates the citation fields, then appends the result to a shared
//! [`Collection`]. Pages that cannot be fetched or have no content are
//! recorded as bad links and the run carries on.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::citation::{Citation, locate_citation};
use crate::content::LocatorConfig;
use crate::fetch::FetchConfig;
use crate::locate::Location;
use crate::page::Webpage;

/// Worker pool configuration.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Number of concurrent workers (default: 8).
    pub workers: usize,
    pub fetch: FetchConfig,
    pub locator: LocatorConfig,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self { workers: 8, fetch: FetchConfig::default(), locator: LocatorConfig::default() }
    }
}

/// One page with its citation and where each field was found.
#[derive(Debug, Clone, Serialize)]
pub struct CollectedDocument {
    pub url: String,
    pub citation: Citation,
    pub locations: BTreeMap<String, Location>,
}

/// Everything a collection run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Collection {
    pub documents: Vec<CollectedDocument>,
    pub bad_links: Vec<String>,
}

/// Splits `items` into `workers` contiguous chunks of `len / workers` items,
/// the last chunk taking the remainder.
pub fn partition<T: Clone>(items: &[T], workers: usize) -> Vec<Vec<T>> {
    let workers = workers.max(1);
    let per_worker = items.len() / workers;

    (0..workers)
        .map(|worker| {
            let start = worker * per_worker;
            let end = if worker + 1 < workers { start + per_worker } else { items.len() };
            items[start..end].to_vec()
        })
        .collect()
}

/// Locates a citation in an already fetched page.
///
/// Returns `None` when the page has no content once trimmed.
pub fn process(citation: &Citation, page: &Webpage, config: &LocatorConfig) -> Option<CollectedDocument> {
    let text = page.standardized_content(config);
    if text.trim().is_empty() {
        return None;
    }

    Some(CollectedDocument {
        url: citation.url.clone(),
        citation: citation.clone(),
        locations: locate_citation(&text, citation),
    })
}

/// Fetches every citation's page and locates its fields.
///
/// Documents are appended as workers finish them, so their order is not the
/// input order.
pub async fn collect(citations: Vec<Citation>, config: &CollectConfig) -> Collection {
    let sink = Arc::new(Mutex::new(Collection::default()));

    let handles: Vec<_> = partition(&citations, config.workers)
        .into_iter()
        .enumerate()
        .map(|(worker, chunk)| {
            let sink = Arc::clone(&sink);
            let fetch = config.fetch.clone();
            let locator = config.locator.clone();
            tokio::spawn(async move { run_worker(worker, chunk, sink, fetch, locator).await })
        })
        .collect();

    for handle in handles {
        if let Err(e) = handle.await {
            warn!(error = %e, "collector worker failed");
        }
    }

    let mut sink = sink.lock().await;
    std::mem::take(&mut *sink)
}

async fn run_worker(
    worker: usize, citations: Vec<Citation>, sink: Arc<Mutex<Collection>>, fetch: FetchConfig, locator: LocatorConfig,
) {
    debug!(worker, count = citations.len(), "collector worker started");

    for citation in citations {
        let document = match Webpage::fetch(&citation.url, &fetch).await {
            Ok(page) => process(&citation, &page, &locator),
            Err(e) => {
                debug!(url = %citation.url, error = %e, "fetch failed");
                None
            }
        };

        let mut sink = sink.lock().await;
        match document {
            Some(document) => sink.documents.push(document),
            None => sink.bad_links.push(citation.url),
        }
    }
}
