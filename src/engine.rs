use crate::config::{FetchConfig, ScrapeConfig};
use crate::error::{FetchError, Result};
use crate::tools::extract::{Extractor, HtmlDocument};
use crate::tools::fetch::PageFetcher;
use crate::tools::map::{map_listing, ListingPlan};
use crate::types::*;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Pause between consecutive product pages.
    pub delay: Duration,
    /// Upper bound on a single page fetch.
    pub timeout: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_fetch_config(&FetchConfig::default())
    }
}

impl EngineOptions {
    pub fn from_fetch_config(cfg: &FetchConfig) -> Self {
        Self {
            delay: Duration::from_millis(cfg.delay_ms),
            timeout: Duration::from_millis(cfg.timeout_ms),
        }
    }
}

/// Sequential page pipeline: discover product links, then fetch and extract
/// one page at a time.
pub struct Engine<'a> {
    fetcher: &'a dyn PageFetcher,
    extractor: Extractor,
    listing: ListingPlan,
    opts: EngineOptions,
    cancel: CancellationToken,
}

impl<'a> Engine<'a> {
    /// Validate `cfg` and compile its selectors.
    pub fn new(cfg: &ScrapeConfig, fetcher: &'a dyn PageFetcher) -> Result<Self> {
        Ok(Self {
            fetcher,
            extractor: Extractor::from_config(cfg)?,
            listing: ListingPlan::from_config(&cfg.listing)?,
            opts: EngineOptions::from_fetch_config(&cfg.fetch),
            cancel: CancellationToken::new(),
        })
    }

    pub fn with_options(mut self, opts: EngineOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token checked between pages; cancelling it ends the run early.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.opts
    }

    pub fn field_count(&self) -> usize {
        self.extractor.field_count()
    }

    /// Product URLs listed in `listing_html`.
    pub fn discover(&self, listing_html: &str, base: Option<&Url>) -> Result<Vec<String>> {
        let doc = HtmlDocument::parse(listing_html);
        map_listing(&doc, &self.listing, base)
    }

    /// Discover product links, then run over them.
    ///
    /// A missing listing container aborts before any fetch and yields an empty report.
    pub async fn run_listing(&self, listing_html: &str, base: Option<&Url>) -> RunReport {
        let urls = match self.discover(listing_html, base) {
            Ok(urls) => urls,
            Err(e) => {
                error!(error = %e, "Could not find the product list container");
                return RunReport::container_not_found();
            }
        };
        self.run(&urls).await
    }

    /// One row per URL, in order. Failed pages become error rows.
    pub async fn run(&self, urls: &[String]) -> RunReport {
        let total = urls.len();
        info!(fetcher = self.fetcher.name(), "Found {total} products. Fetching data...");

        let mut rows = ResultSet::new();
        let mut failures = 0;
        let mut outcome = RunOutcome::Completed;

        for (idx, url) in urls.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!(processed = idx, total, "run cancelled");
                outcome = RunOutcome::Cancelled;
                break;
            }

            info!("Processing {}/{}: {}", idx + 1, total, url);
            match self.scrape_page(url).await {
                Ok(record) => rows.push(record),
                Err(e) => {
                    error!(url = %url, error = %e, "Failed to fetch");
                    failures += 1;
                    rows.push(ProductRecord::error(self.field_count()));
                }
            }

            if idx + 1 < total {
                self.pause().await;
            }
        }

        info!(rows = rows.len(), failures, outcome = outcome.as_str(), "Finished");
        RunReport {
            rows,
            outcome,
            failures,
        }
    }

    /// Fetch and extract a single product page.
    pub async fn scrape_page(&self, url: &str) -> std::result::Result<ProductRecord, FetchError> {
        let html = self.fetch(url).await?;
        Ok(self.extract(&html))
    }

    /// Extract a record from markup that is already in hand.
    pub fn extract(&self, html: &str) -> ProductRecord {
        self.extractor.extract_html(html)
    }

    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        match tokio::time::timeout(self.opts.timeout, self.fetcher.fetch(url)).await {
            Ok(res) => res,
            Err(_) => Err(FetchError::Timeout {
                ms: self.opts.timeout.as_millis() as u64,
            }),
        }
    }

    async fn pause(&self) {
        if self.opts.delay.is_zero() {
            return;
        }
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = tokio::time::sleep(self.opts.delay) => {}
        }
    }
}
