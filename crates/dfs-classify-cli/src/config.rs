//! CLI configuration management.
//!
//! Precedence, lowest first: built-in defaults, the JSON config file, then
//! environment variables (a `.env` file is loaded into the environment first).
//! Command-line flags override all of these at the call site.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use dfs_classify_core::{ClassifyConfig, EngineKind};
use serde::{Deserialize, Serialize};

use crate::render::OutputFormat;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "DFSC_CONFIG";

/// Application-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine used when `--engine` is not given.
    pub engine: EngineKind,

    /// First timestamp handed out by the traversal clock.
    pub clock_base: u64,

    /// Output format used when `--format` is not given.
    pub format: OutputFormat,

    /// Seed for `random` when `--seed` is not given.
    pub seed: Option<u64>,

    /// Print the adjacency matrix in text output.
    pub show_matrix: bool,
}

impl Default for Config {
    fn default() -> Self {
        let classify = ClassifyConfig::default();
        Self {
            engine: classify.engine,
            clock_base: classify.clock_base,
            format: OutputFormat::Text,
            seed: None,
            show_matrix: false,
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            _ => Self::default(),
        };

        if let Ok(engine) = std::env::var("DFSC_ENGINE") {
            config.engine = engine.parse().map_err(anyhow::Error::msg)?;
        }
        if let Ok(base) = std::env::var("DFSC_CLOCK_BASE") {
            config.clock_base = base
                .parse()
                .with_context(|| format!("DFSC_CLOCK_BASE is not a number: {base}"))?;
        }
        if let Ok(format) = std::env::var("DFSC_FORMAT") {
            config.format = format.parse()?;
        }
        if let Ok(seed) = std::env::var("DFSC_SEED") {
            config.seed = Some(
                seed.parse()
                    .with_context(|| format!("DFSC_SEED is not a number: {seed}"))?,
            );
        }

        Ok(config)
    }

    /// Save current configuration to the config file.
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_file_path() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&config_path, contents)
                .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        }
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("dev", "dfs-classify", "dfsc")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Library configuration, with optional overrides from the command line.
    ///
    /// Fails when the resulting clock base is out of range; `config set` and
    /// `config reset` still work so a bad stored value can be corrected.
    pub fn classify_config(
        &self,
        engine: Option<EngineKind>,
        clock_base: Option<u64>,
    ) -> Result<ClassifyConfig> {
        let classify = ClassifyConfig {
            engine: engine.unwrap_or(self.engine),
            clock_base: clock_base.unwrap_or(self.clock_base),
        };
        classify
            .validate()
            .context("Invalid clock base in configuration")?;
        Ok(classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"engine": "recursive"}"#).unwrap();
        assert_eq!(config.engine, EngineKind::Recursive);
        assert_eq!(config.clock_base, 1);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_engine_override() {
        let config = Config::default();
        assert_eq!(config.classify_config(None, None).unwrap().engine, EngineKind::Iterative);
        assert_eq!(
            config
                .classify_config(Some(EngineKind::Recursive), None)
                .unwrap()
                .engine,
            EngineKind::Recursive
        );
    }

    #[test]
    fn test_oversized_clock_base_is_rejected() {
        let config: Config =
            serde_json::from_str(r#"{"clock_base": 18446744073709551615}"#).unwrap();
        let err = config.classify_config(None, None).unwrap_err();
        assert!(format!("{err:#}").contains("too large"));
        assert_eq!(config.classify_config(None, Some(0)).unwrap().clock_base, 0);
    }
}
