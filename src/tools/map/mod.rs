//! Map Tools


use crate::config::ListingConfig;
use crate::error::{Result, ScrapeError};
use crate::selectors::Query;
use crate::tools::extract::DocumentTree;
use url::Url;

/// Compiled listing selectors.
#[derive(Debug, Clone)]
pub struct ListingPlan {
    pub container: Query,
    pub link_path: Query,
}

impl ListingPlan {
    pub fn new(container: &str, link_path: &str) -> Result<Self> {
        Ok(Self {
            container: Query::parse(container)?,
            link_path: Query::parse(link_path)?,
        })
    }

    pub fn from_config(cfg: &ListingConfig) -> Result<Self> {
        Self::new(&cfg.container, &cfg.link_path)
    }
}

/// Map product URLs from a listing page, in document order.
///
/// Every anchor yields exactly one URL so every product gets a row later on.
/// Relative hrefs are resolved against `base` when given; anchors without an
/// `href` map to an empty URL, which fails to fetch and becomes an error row.
pub fn map_listing<D: DocumentTree + ?Sized>(
    doc: &D,
    plan: &ListingPlan,
    base: Option<&Url>,
) -> Result<Vec<String>> {
    let hrefs = doc
        .attr_values(&plan.container, &plan.link_path, "href")
        .ok_or_else(|| ScrapeError::ContainerNotFound {
            selector: plan.container.to_string(),
        })?;

    Ok(hrefs
        .into_iter()
        .map(|href| match href {
            Some(href) => resolve_href(&href, base),
            None => {
                tracing::warn!(container = %plan.container, "product link without href");
                String::new()
            }
        })
        .collect())
}

/// Absolute URL for `href`, or the trimmed href itself when it cannot be resolved.
pub fn resolve_href(href: &str, base: Option<&Url>) -> String {
    let href = href.trim();

    // Handle protocol-relative URLs (//example.com/path)
    let resolved = if href.starts_with("//") {
        base.and_then(|b| Url::parse(&format!("{}:{}", b.scheme(), href)).ok())
    } else {
        Url::parse(href)
            .ok()
            .or_else(|| base.and_then(|b| b.join(href).ok()))
    };

    resolved
        .map(|u| u.to_string())
        .unwrap_or_else(|| href.to_string())
}
