use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

pub const DEFAULT_MEALDB_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const DEFAULT_COCKTAILDB_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";
pub const DEFAULT_OPENFOODFACTS_URL: &str = "https://world.openfoodfacts.org";

/// Runtime settings. Loaded from `tasting.toml`, then overridden by `TASTING_*` env vars.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mealdb_url: String,
    pub cocktaildb_url: String,
    pub openfoodfacts_url: String,
    /// Page size requested from the product search endpoint.
    pub product_page_size: u32,
    /// Maximum number of items kept from a category filter.
    pub category_limit: usize,
    pub initial_category: String,
    pub user_agent: String,
    /// Per-request timeout. Unset means the transport default (none).
    pub request_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mealdb_url: DEFAULT_MEALDB_URL.to_string(),
            cocktaildb_url: DEFAULT_COCKTAILDB_URL.to_string(),
            openfoodfacts_url: DEFAULT_OPENFOODFACTS_URL.to_string(),
            product_page_size: 10,
            category_limit: 6,
            initial_category: "Breakfast".to_string(),
            user_agent: "tasting/0.1".to_string(),
            request_timeout_ms: None,
        }
    }
}

impl Config {
    /// Resolve configuration: an explicit path must exist; otherwise the
    /// platform config file is used when present, else built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Apply `TASTING_*` overrides. Unparseable numbers are ignored.
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = non_empty("TASTING_MEALDB_URL") { self.mealdb_url = v; }
        if let Some(v) = non_empty("TASTING_COCKTAILDB_URL") { self.cocktaildb_url = v; }
        if let Some(v) = non_empty("TASTING_OPENFOODFACTS_URL") { self.openfoodfacts_url = v; }
        if let Some(v) = non_empty("TASTING_PRODUCT_PAGE_SIZE").and_then(|s| s.parse::<u32>().ok()) { self.product_page_size = v; }
        if let Some(v) = non_empty("TASTING_CATEGORY_LIMIT").and_then(|s| s.parse::<usize>().ok()) { self.category_limit = v; }
        if let Some(v) = non_empty("TASTING_TIMEOUT_MS").and_then(|s| s.parse::<u64>().ok()) { self.request_timeout_ms = Some(v); }
    }
}

/// `tasting.toml` inside the user's config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "tasting", "tasting").map(|dirs| dirs.config_dir().join("tasting.toml"))
}
