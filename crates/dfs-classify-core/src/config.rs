//! Configuration for a classification run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ConfigResult};

/// Largest accepted clock base.
///
/// A traversal hands out two stamps per vertex, so the clock ends at most
/// `base + 2 * |V|`. With the base at or below 2^62 that stays inside `u64`
/// for any graph that fits in memory.
pub const MAX_CLOCK_BASE: u64 = 1 << 62;

/// Which engine drives the traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Native call recursion. Depth is bounded by the thread's stack.
    Recursive,
    /// Explicit frame stack.
    #[default]
    Iterative,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Recursive => f.write_str("recursive"),
            EngineKind::Iterative => f.write_str("iterative"),
        }
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recursive" | "rec" => Ok(EngineKind::Recursive),
            "iterative" | "iter" | "stack" => Ok(EngineKind::Iterative),
            other => Err(format!(
                "unknown engine: {other} (expected recursive or iterative)"
            )),
        }
    }
}

/// Settings for one `classify` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Engine used by [`crate::classify_with`].
    #[serde(default)]
    pub engine: EngineKind,

    /// First timestamp handed out by the clock.
    #[serde(default = "default_clock_base")]
    pub clock_base: u64,
}

fn default_clock_base() -> u64 {
    1
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            clock_base: default_clock_base(),
        }
    }
}

impl ClassifyConfig {
    /// Reference configuration: recursive engine.
    pub fn recursive() -> Self {
        Self {
            engine: EngineKind::Recursive,
            ..Default::default()
        }
    }

    /// Explicit-stack engine, safe for deep graphs.
    pub fn iterative() -> Self {
        Self {
            engine: EngineKind::Iterative,
            ..Default::default()
        }
    }

    /// Set the clock base, clamped to [`MAX_CLOCK_BASE`].
    pub fn with_clock_base(mut self, clock_base: u64) -> Self {
        if clock_base > MAX_CLOCK_BASE {
            warn!(clock_base, max = MAX_CLOCK_BASE, "clock_base_clamped");
        }
        self.clock_base = clock_base.min(MAX_CLOCK_BASE);
        self
    }

    /// Reject settings a traversal cannot honor, e.g. a deserialized clock base
    /// above [`MAX_CLOCK_BASE`].
    pub fn validate(&self) -> ConfigResult<()> {
        if self.clock_base > MAX_CLOCK_BASE {
            return Err(ConfigError::ClockBaseTooLarge {
                base: self.clock_base,
                max: MAX_CLOCK_BASE,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClassifyConfig::default();
        assert_eq!(config.engine, EngineKind::Iterative);
        assert_eq!(config.clock_base, 1);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: ClassifyConfig = serde_json::from_str(r#"{"engine":"recursive"}"#).unwrap();
        assert_eq!(config, ClassifyConfig::recursive());
    }

    #[test]
    fn test_clock_base_clamped_to_max() {
        let config = ClassifyConfig::default().with_clock_base(u64::MAX - 1);
        assert_eq!(config.clock_base, MAX_CLOCK_BASE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_clock_base() {
        let config: ClassifyConfig =
            serde_json::from_str(r#"{"clock_base": 18446744073709551614}"#).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::ClockBaseTooLarge {
                base: u64::MAX - 1,
                max: MAX_CLOCK_BASE,
            })
        );
        assert!(ClassifyConfig::default().with_clock_base(MAX_CLOCK_BASE).validate().is_ok());
    }

    #[test]
    fn test_engine_kind_parse() {
        assert_eq!("Recursive".parse::<EngineKind>(), Ok(EngineKind::Recursive));
        assert_eq!("stack".parse::<EngineKind>(), Ok(EngineKind::Iterative));
        assert!("bfs".parse::<EngineKind>().is_err());
    }
}
