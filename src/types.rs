use serde::{Deserialize, Serialize};

/// Placeholder for a field whose label was not found on the page.
pub const MISSING_VALUE: &str = "N/A";

/// Placeholder used in every cell of a row whose page could not be fetched.
pub const ERROR_VALUE: &str = "Error";

/// A named attribute and the labels it may appear under, tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub aliases: Vec<String>,
}

impl FieldDefinition {
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// One output row: the product name followed by one value per configured field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRecord(Vec<String>);

impl ProductRecord {
    pub fn new(name: String, values: Vec<String>) -> Self {
        let mut row = Vec::with_capacity(values.len() + 1);
        row.push(name);
        row.extend(values);
        Self(row)
    }

    /// Row of the same width as a successful one, filled with [`ERROR_VALUE`].
    pub fn error(field_count: usize) -> Self {
        Self(vec![ERROR_VALUE.to_string(); field_count + 1])
    }

    pub fn name(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    pub fn values(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_error(&self) -> bool {
        self.0.iter().all(|v| v == ERROR_VALUE)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Rows in input order, one per product URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<ProductRecord>);

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ProductRecord) {
        self.0.push(record);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rows(&self) -> &[ProductRecord] {
        &self.0
    }

    /// Pretty-printed JSON array of arrays.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<ProductRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Completed,
    Cancelled,
    ContainerNotFound,
}

impl RunOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::Completed => "completed",
            RunOutcome::Cancelled => "cancelled",
            RunOutcome::ContainerNotFound => "container not found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub rows: ResultSet,
    pub outcome: RunOutcome,
    /// Number of error rows in `rows`.
    pub failures: usize,
}

impl RunReport {
    pub fn container_not_found() -> Self {
        Self {
            rows: ResultSet::new(),
            outcome: RunOutcome::ContainerNotFound,
            failures: 0,
        }
    }
}
