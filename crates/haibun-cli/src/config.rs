use anyhow::{Context, Result};
use haibun_core::{AllocatorConfig, RoundingMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "haibun.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StockConfig {
    /// Share of incoming stock held back for manual allocation
    #[serde(default = "default_discretion_ratio")]
    pub discretion_ratio: f64,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self { discretion_ratio: default_discretion_ratio() }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct HaibunConfig {
    #[serde(default)]
    pub allocator: AllocatorConfig,
    #[serde(default)]
    pub stock: StockConfig,
}

impl HaibunConfig {
    /// Loads the configuration file, falling back to defaults when it does not exist.
    ///
    /// The path comes from `explicit`, then `HAIBUN_CONFIG_PATH`, then `haibun.toml`.
    /// An explicitly named file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => std::env::var("HAIBUN_CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };

        let config = match fs::read_to_string(&config_path) {
            Ok(raw) => Self::from_toml(&raw)
                .with_context(|| format!("invalid configuration in {}", config_path.display()))?,
            Err(err) if explicit.is_some() => {
                return Err(err)
                    .with_context(|| format!("cannot read configuration {}", config_path.display()));
            }
            Err(_) => {
                warn!(
                    "Configuration file '{}' not found. Using default configuration.",
                    config_path.display()
                );
                Self::default()
            }
        };

        Ok(config.apply_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.allocator.validate()?;
        Ok(config)
    }

    /// Applies `HAIBUN_*` overrides; unparsable values are ignored with a warning.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("HAIBUN_DISCRETION_RATIO") {
            match raw.parse::<f64>() {
                Ok(ratio) => self.stock.discretion_ratio = ratio,
                Err(_) => warn!(value = %raw, "Ignoring HAIBUN_DISCRETION_RATIO"),
            }
        }
        if let Some(raw) = lookup("HAIBUN_ROUNDING") {
            match raw.to_lowercase().as_str() {
                "half_even" => self.allocator.rounding = RoundingMode::HalfEven,
                "half_up" => self.allocator.rounding = RoundingMode::HalfUp,
                _ => warn!(value = %raw, "Ignoring HAIBUN_ROUNDING"),
            }
        }
        if let Some(raw) = lookup("HAIBUN_RECONCILE") {
            match raw.parse::<bool>() {
                Ok(reconcile) => self.allocator.reconcile = reconcile,
                Err(_) => warn!(value = %raw, "Ignoring HAIBUN_RECONCILE"),
            }
        }

        info!(
            rounding = %self.allocator.rounding,
            reconcile = self.allocator.reconcile,
            discretion_ratio = self.stock.discretion_ratio,
            "Configuration resolved"
        );
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn default_discretion_ratio() -> f64 {
    0.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_uses_defaults() {
        let config = HaibunConfig::from_toml("").unwrap();
        assert_eq!(config, HaibunConfig::default());
        assert_eq!(config.stock.discretion_ratio, 0.3);
    }

    #[test]
    fn sections_are_parsed() {
        let config = HaibunConfig::from_toml(
            r#"
[allocator]
rounding = "half_up"
reconcile = true

[stock]
discretion_ratio = 0.1
"#,
        )
        .unwrap();
        assert_eq!(config.allocator.rounding, RoundingMode::HalfUp);
        assert!(config.allocator.reconcile);
        assert_eq!(config.stock.discretion_ratio, 0.1);
    }

    #[test]
    fn invalid_allocator_settings_are_rejected() {
        assert!(HaibunConfig::from_toml("[allocator]\nepsilon = -1.0").is_err());
        assert!(HaibunConfig::from_toml("[allocator]\nrounding = \"sideways\"").is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            ("HAIBUN_DISCRETION_RATIO", "0.5"),
            ("HAIBUN_ROUNDING", "HALF_UP"),
            ("HAIBUN_RECONCILE", "not-a-bool"),
        ]
        .into_iter()
        .collect();

        let config = HaibunConfig::default()
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.stock.discretion_ratio, 0.5);
        assert_eq!(config.allocator.rounding, RoundingMode::HalfUp);
        assert!(!config.allocator.reconcile);
    }

    #[test]
    fn rendered_toml_round_trips() {
        let config = HaibunConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[allocator]"));
        assert_eq!(HaibunConfig::from_toml(&rendered).unwrap(), config);
    }
}
