//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;
use dfs_classify_core::ClassifyConfig;

use crate::config::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("dfsc Configuration");
    println!("{:-<40}", "");

    println!("Engine:       {}", config.engine);
    println!("Clock Base:   {}", config.clock_base);
    println!("Format:       {}", config.format);
    println!(
        "Seed:         {}",
        config
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(random)".to_string())
    );
    println!("Show Matrix:  {}", config.show_matrix);

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "engine" => {
            config.engine = value.parse().map_err(anyhow::Error::msg)?;
        }
        "clock-base" | "base" => {
            let base: u64 = value.parse()?;
            ClassifyConfig {
                clock_base: base,
                ..ClassifyConfig::default()
            }
            .validate()?;
            config.clock_base = base;
        }
        "format" => {
            config.format = value.parse()?;
        }
        "seed" => {
            config.seed = match value {
                "none" | "random" => None,
                n => Some(n.parse()?),
            };
        }
        "matrix" | "show-matrix" => {
            config.show_matrix = value.parse()?;
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}. Valid keys: engine, clock-base, format, seed, matrix",
                key
            );
        }
    }

    println!("Set {} to: {}", key, value);
    config.save()?;
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    let value = match key {
        "engine" => config.engine.to_string(),
        "clock-base" | "base" => config.clock_base.to_string(),
        "format" => config.format.to_string(),
        "seed" => config
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(random)".to_string()),
        "matrix" | "show-matrix" => config.show_matrix.to_string(),
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    };

    println!("{}", value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
