//! Read-only view over a parsed page.

use crate::selectors::Query;
use scraper::{ElementRef, Html};

/// What the extraction code needs from a parsed page, independent of the parser.
///
/// Every method returns elements in document order and their text trimmed.
pub trait DocumentTree {
    /// Trimmed text of every element matching `candidates` inside the first
    /// element matching `region`. `None` when the region is absent.
    fn region_texts(&self, region: &Query, candidates: &Query) -> Option<Vec<String>>;

    /// Trimmed text of the first element matching `query`.
    fn first_text(&self, query: &Query) -> Option<String>;

    /// `attr` of every element matching `path` inside the first element
    /// matching `container`. `None` when the container is absent.
    fn attr_values(&self, container: &Query, path: &Query, attr: &str)
        -> Option<Vec<Option<String>>>;
}

/// [`DocumentTree`] backed by `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Lenient HTML5 parse; malformed markup never fails.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    fn first(&self, query: &Query) -> Option<ElementRef<'_>> {
        self.html.select(query.selector()).next()
    }
}

fn trimmed_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

impl DocumentTree for HtmlDocument {
    fn region_texts(&self, region: &Query, candidates: &Query) -> Option<Vec<String>> {
        let root = self.first(region)?;
        Some(
            root.select(candidates.selector())
                .map(|el| trimmed_text(&el))
                .collect(),
        )
    }

    fn first_text(&self, query: &Query) -> Option<String> {
        self.first(query).map(|el| trimmed_text(&el))
    }

    fn attr_values(
        &self,
        container: &Query,
        path: &Query,
        attr: &str,
    ) -> Option<Vec<Option<String>>> {
        let root = self.first(container)?;
        Some(
            root.select(path.selector())
                .map(|el| el.value().attr(attr).map(|v| v.to_string()))
                .collect(),
        )
    }
}
