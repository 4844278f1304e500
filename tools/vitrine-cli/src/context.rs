//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use product_page::{sample_product, ProductPage};
use vitrine_cache::{FileStore, SystemClock};
use vitrine_observability::{LogLevel, StructuredLogger};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// The snapshot file.
    pub fn storage_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.path)
    }

    /// Logger configured from `[log]`; `--verbose` lowers the level to debug.
    pub fn logger(&self) -> StructuredLogger {
        let level = if self.output.is_verbose() {
            LogLevel::Debug.min(self.config.log.level)
        } else {
            self.config.log.level
        };

        StructuredLogger::new(self.config.page.storage_key.clone())
            .with_component("vitrine-cli")
            .with_min_level(level)
            .with_format(self.config.log.format)
    }

    /// Mount the sample product page over the snapshot file.
    pub fn mount_page(&self) -> ProductPage<FileStore, SystemClock> {
        let store = FileStore::open(self.storage_path());
        self.output
            .debug(&format!("Snapshot file {}", store.path().display()));
        ProductPage::mount_with_options(
            sample_product(),
            store,
            SystemClock,
            &self.config.page,
            self.logger(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(Context::find_config(&nested), None);

        let config = dir.path().join("vitrine.toml");
        std::fs::write(&config, "").unwrap();
        assert_eq!(Context::find_config(&nested), Some(config));
    }

    #[test]
    fn test_resolve_path() {
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/work"),
        };
        assert_eq!(ctx.resolve_path("/tmp/x.json"), PathBuf::from("/tmp/x.json"));
        assert_eq!(
            ctx.storage_path(),
            PathBuf::from("/work/.vitrine/storage.json")
        );
    }
}
