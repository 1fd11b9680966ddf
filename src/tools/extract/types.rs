use super::document::DocumentTree;
use super::utils::shortest_match;
use crate::error::Result;
use crate::selectors::Query;

/// Where labels are searched on a product page.
#[derive(Debug, Clone)]
pub struct MatchScope {
    pub region: Query,
    pub candidates: Query,
    pub case_sensitive: bool,
}

impl MatchScope {
    pub fn new(region: &str, candidates: &str, case_sensitive: bool) -> Result<Self> {
        Ok(Self {
            region: Query::parse(region)?,
            candidates: Query::parse(candidates)?,
            case_sensitive,
        })
    }
}

/// Snapshot of the trimmed texts inside a page's content region.
///
/// Collected once per page so every label is matched against the same texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRegion {
    texts: Vec<String>,
    case_sensitive: bool,
}

impl ContentRegion {
    /// An absent region behaves as one with no elements.
    pub fn collect<D: DocumentTree + ?Sized>(doc: &D, scope: &MatchScope) -> Self {
        Self {
            texts: doc
                .region_texts(&scope.region, &scope.candidates)
                .unwrap_or_default(),
            case_sensitive: scope.case_sensitive,
        }
    }

    pub fn from_texts(texts: Vec<String>, case_sensitive: bool) -> Self {
        Self {
            texts,
            case_sensitive,
        }
    }

    /// `Some("")` when an element's text is exactly the label.
    pub fn find(&self, label: &str) -> Option<String> {
        shortest_match(&self.texts, label, self.case_sensitive)
    }
}
