//! Compiled CSS queries

use crate::error::{Result, ScrapeError};
use scraper::Selector;
use std::fmt;

/// A CSS selector compiled once, keeping its source text for diagnostics.
#[derive(Debug, Clone)]
pub struct Query {
    source: String,
    selector: Selector,
}

impl Query {
    pub fn parse(source: &str) -> Result<Self> {
        let selector = Selector::parse(source).map_err(|e| ScrapeError::InvalidSelector {
            selector: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }

    /// Compile a list of selectors, failing on the first invalid one.
    pub fn parse_all<S: AsRef<str>>(sources: &[S]) -> Result<Vec<Self>> {
        sources.iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
