use crate::error::{Result, ScrapeError};
use crate::types::FieldDefinition;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_DELAY_MS: u64 = 100;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Where product links live on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    pub container: String,
    /// Evaluated inside the container; the `href` of each match is a product URL.
    pub link_path: String,
}

/// Which part of a product page is searched for labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    pub region: String,
    pub candidates: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_ms: u64,
    /// Politeness delay between product pages.
    pub delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Whole content panel, case-insensitive labels with aliases
    #[default]
    Complete,
    /// Description tab only, case-sensitive single keywords
    DescriptionTab,
}

/// Everything a run needs: selectors, field table and fetch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub listing: ListingConfig,
    pub content: ContentConfig,
    /// Tried in order; the first one that matches gives the product name.
    pub name_selectors: Vec<String>,
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::complete()
    }
}

impl ScrapeConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Complete => Self::complete(),
            Preset::DescriptionTab => Self::description_tab(),
        }
    }

    /// Header and tab values alike, searched across `#content`.
    pub fn complete() -> Self {
        Self {
            listing: default_listing(),
            content: ContentConfig {
                region: "#content".into(),
                candidates: "*".into(),
                case_sensitive: false,
            },
            name_selectors: vec!["h1".into()],
            fields: vec![
                FieldDefinition::new("Price", &["$"]),
                FieldDefinition::new("Availability", &["Availability:"]),
                FieldDefinition::new("Product_Code", &["Product Code:"]),
                FieldDefinition::new("mAh", &["True mAh +/- 5%:", "mAh +/- 5%:"]),
                FieldDefinition::new("Voltage", &["Voltage:"]),
                FieldDefinition::new("C_Rate", &["C rate:", "Factory C rate:"]),
                FieldDefinition::new("Power_Factor", &["Power Factor:"]),
                FieldDefinition::new("Size", &["Size:"]),
                FieldDefinition::new(
                    "Weight",
                    &["Weight:", "Weight +/- 10gr:", "Weight +/- 5gr:"],
                ),
                FieldDefinition::new("Wire_Size", &["Wire size:"]),
                FieldDefinition::new("Charge_Rate", &["Charge rate:"]),
            ],
            fetch: FetchConfig::default(),
        }
    }

    /// Only the description tab, one keyword per field.
    pub fn description_tab() -> Self {
        Self {
            listing: default_listing(),
            content: ContentConfig {
                region: "#tab-description".into(),
                candidates: "p, h3, li, span, div".into(),
                case_sensitive: true,
            },
            name_selectors: vec!["#tab-description > h4 > span".into(), "#content h1".into()],
            fields: vec![
                FieldDefinition::new("mAh", &["True mAh +/- 5%:"]),
                FieldDefinition::new("Voltage", &["Voltage:"]),
                FieldDefinition::new("C_Rate", &["C rate:"]),
                FieldDefinition::new("Power_Factor", &["Power Factor:"]),
                FieldDefinition::new("Size", &["Size:"]),
                FieldDefinition::new("Weight", &["Weight:"]),
                FieldDefinition::new("Wire_Size", &["Wire size:"]),
                FieldDefinition::new("Charge_Rate", &["Charge rate:"]),
            ],
            fetch: FetchConfig::default(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// `~/.labelscrape/config.json` when it exists.
    pub fn user_config_path() -> Option<PathBuf> {
        let path = crate::log::app_dir()?.join("config.json");
        path.exists().then_some(path)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Structural checks; selectors are checked when they are compiled.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(ScrapeError::Config("no fields configured".into()));
        }
        if self.name_selectors.is_empty() {
            return Err(ScrapeError::Config("no name selectors configured".into()));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ScrapeError::Config(format!(
                    "duplicate field name `{}`",
                    field.name
                )));
            }
            if field.aliases.is_empty() {
                return Err(ScrapeError::Config(format!(
                    "field `{}` has no aliases",
                    field.name
                )));
            }
            if field.aliases.iter().any(|a| a.is_empty()) {
                return Err(ScrapeError::Config(format!(
                    "field `{}` has an empty alias",
                    field.name
                )));
            }
        }
        if self.fetch.timeout_ms == 0 {
            return Err(ScrapeError::Config("timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

fn default_listing() -> ListingConfig {
    ListingConfig {
        container: "#content > div:nth-child(7)".into(),
        link_path: "div > div > div.image > a".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn presets_are_valid() {
        assert!(ScrapeConfig::complete().validate().is_ok());
        assert!(ScrapeConfig::description_tab().validate().is_ok());
    }

    #[test]
    fn complete_preset_field_order() {
        let cfg = ScrapeConfig::complete();
        assert_eq!(cfg.fields.len(), 11);
        assert_eq!(cfg.field_names()[0], "Price");
        assert_eq!(cfg.field_names()[10], "Charge_Rate");
        assert_eq!(
            cfg.fields[3].aliases,
            vec!["True mAh +/- 5%:".to_string(), "mAh +/- 5%:".to_string()]
        );
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let mut cfg = ScrapeConfig::complete();
        cfg.fields.push(FieldDefinition::new("Voltage", &["V:"]));
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate field name `Voltage`"));
    }

    #[test]
    fn rejects_empty_aliases() {
        let mut cfg = ScrapeConfig::complete();
        cfg.fields[0].aliases.clear();
        assert!(matches!(cfg.validate(), Err(ScrapeError::Config(_))));

        let mut cfg = ScrapeConfig::complete();
        cfg.fields[0].aliases.push(String::new());
        assert!(matches!(cfg.validate(), Err(ScrapeError::Config(_))));
    }

    #[test]
    fn load_round_trips_through_json_file() {
        let cfg = ScrapeConfig::description_tab();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string_pretty(&cfg).unwrap()).unwrap();

        let loaded = ScrapeConfig::load(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_fills_default_fetch_settings() {
        let json = r##"{
            "listing": { "container": "#list", "link_path": "a" },
            "content": { "region": "main", "candidates": "*" },
            "name_selectors": ["h1"],
            "fields": [{ "name": "Voltage", "aliases": ["Voltage:"] }]
        }"##;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{json}").unwrap();

        let loaded = ScrapeConfig::load(file.path()).unwrap();
        assert!(!loaded.content.case_sensitive);
        assert_eq!(loaded.fetch, FetchConfig::default());
    }

    #[test]
    fn load_rejects_invalid_config() {
        let json = r##"{
            "listing": { "container": "#list", "link_path": "a" },
            "content": { "region": "main", "candidates": "*" },
            "name_selectors": ["h1"],
            "fields": []
        }"##;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{json}").unwrap();

        assert!(matches!(
            ScrapeConfig::load(file.path()),
            Err(ScrapeError::Config(_))
        ));
    }
}
