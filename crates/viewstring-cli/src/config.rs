//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `VIEWSTRING__ENGINE__CONTENT_ROOT=./site`
//! 3. Config file: `--config FILE`, else [`AppConfig::config_path`]
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use viewstring_adapters::ViewEngineOptions;

/// Prefix and nesting separator for environment overrides.
const ENV_PREFIX: &str = "VIEWSTRING";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// View engine settings.
    pub engine: ViewEngineOptions,
    /// Values the temp-data store starts with.
    pub temp_data: Map<String, Value>,
    /// Values merged into every view's top-level context.
    pub globals: Map<String, Value>,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with(
            config_file.map(PathBuf::as_path),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    fn load_with(config_file: Option<&Path>, env: Environment) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        let settings = Config::builder()
            .add_source(
                Config::try_from(&Self::default()).context("Failed to encode default config")?,
            )
            .add_source(File::from(path.as_path()).required(required))
            .add_source(
                env.prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config: Self = settings
            .try_deserialize()
            .context("Configuration has an invalid shape")?;

        tracing::debug!(
            content_root = %config.engine.content_root.display(),
            globals = config.globals.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Apply a `--content-root` override.
    pub fn with_content_root(mut self, content_root: Option<PathBuf>) -> Self {
        if let Some(root) = content_root {
            self.engine.content_root = root;
        }
        self
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `viewstring.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "viewstring", "viewstring")
            .map(|d| d.config_dir().join("viewstring.toml"))
            .unwrap_or_else(|| PathBuf::from("viewstring.toml"))
    }
}
