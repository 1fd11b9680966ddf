//! Extract Tools

mod document;
pub mod types;
mod utils;

pub use document::{DocumentTree, HtmlDocument};
pub use types::*;

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::selectors::Query;
use crate::types::{FieldDefinition, ProductRecord, MISSING_VALUE};

/// Value following `label` inside the scoped content region, if any element starts with it.
pub fn match_label<D: DocumentTree + ?Sized>(
    doc: &D,
    scope: &MatchScope,
    label: &str,
) -> Option<String> {
    ContentRegion::collect(doc, scope).find(label)
}

/// First alias that matches, or [`MISSING_VALUE`].
pub fn resolve_field(region: &ContentRegion, field: &FieldDefinition) -> String {
    field
        .aliases
        .iter()
        .find_map(|alias| region.find(alias))
        .unwrap_or_else(|| {
            tracing::debug!(field = %field.name, "no alias matched");
            MISSING_VALUE.to_string()
        })
}

/// Trimmed text of the first selector that matches, or [`MISSING_VALUE`].
pub fn extract_name<D: DocumentTree + ?Sized>(doc: &D, selectors: &[Query]) -> String {
    selectors
        .iter()
        .find_map(|q| doc.first_text(q))
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Compiled per-page extraction: name selectors, match scope and field table.
#[derive(Debug, Clone)]
pub struct Extractor {
    scope: MatchScope,
    name_selectors: Vec<Query>,
    fields: Vec<FieldDefinition>,
}

impl Extractor {
    pub fn new(scope: MatchScope, name_selectors: Vec<Query>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            scope,
            name_selectors,
            fields,
        }
    }

    pub fn from_config(cfg: &ScrapeConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self::new(
            MatchScope::new(
                &cfg.content.region,
                &cfg.content.candidates,
                cfg.content.case_sensitive,
            )?,
            Query::parse_all(&cfg.name_selectors)?,
            cfg.fields.clone(),
        ))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// `[name, field_1, .., field_k]` for one parsed page.
    pub fn extract_record<D: DocumentTree + ?Sized>(&self, doc: &D) -> ProductRecord {
        let name = extract_name(doc, &self.name_selectors);
        let region = ContentRegion::collect(doc, &self.scope);
        let values = self
            .fields
            .iter()
            .map(|field| resolve_field(&region, field))
            .collect();
        ProductRecord::new(name, values)
    }

    /// Parse `html` and extract its record.
    pub fn extract_html(&self, html: &str) -> ProductRecord {
        self.extract_record(&HtmlDocument::parse(html))
    }
}
