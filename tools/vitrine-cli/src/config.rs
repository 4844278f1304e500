//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use product_page::PageOptions;
use vitrine_observability::{LogFormat, LogLevel};

/// Names searched for, in order, when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["vitrine.toml", ".vitrine.toml", "vitrine.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Page behavior.
    #[serde(default)]
    pub page: PageOptions,

    /// Where snapshots are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Problems that make the config unusable, then ones worth a warning.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.page.storage_key.trim().is_empty() {
            errors.push("page.storage_key must not be empty".to_string());
        }
        if self.page.ttl_minutes == 0 {
            errors.push("page.ttl_minutes must be at least 1".to_string());
        }
        if !self.page.lookup_base_url.starts_with("http://")
            && !self.page.lookup_base_url.starts_with("https://")
        {
            errors.push(format!(
                "page.lookup_base_url '{}' must be an http(s) URL",
                self.page.lookup_base_url
            ));
        }
        if self.page.lookup_base_url.ends_with('/') {
            warnings.push("page.lookup_base_url has a trailing '/'".to_string());
        }
        if self.storage.path.trim().is_empty() {
            errors.push("storage.path must not be empty".to_string());
        }
        if self.page.ttl_minutes > 24 * 60 {
            warnings.push(format!(
                "page.ttl_minutes = {} keeps selections for more than a day",
                self.page.ttl_minutes
            ));
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Snapshot storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the snapshot, relative to the working directory.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".vitrine/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level written to stderr.
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// `json` or `human`.
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Generate a default vitrine.toml config file.
pub fn generate_default_config() -> String {
    r#"# Vitrine product page configuration

[page]
# Key the page snapshot is stored under
storage_key = "productPageData"
# Minutes a saved selection is restored for
ttl_minutes = 15
# Overlapping CEP lookups: "last-response-wins" or "last-request-wins"
ordering = "last-response-wins"
lookup_base_url = "https://viacep.com.br"

[storage]
path = ".vitrine/storage.json"

[log]
# trace, debug, info, warn or error
level = "warn"
# json or human
format = "human"
"#
    .to_string()
}
