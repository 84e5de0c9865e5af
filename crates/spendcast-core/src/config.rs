//! Forecast configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/spendcast/config/forecast.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! An explicit path skips the lookup entirely.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/forecast.toml");

/// How the income heuristic labels forecast months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackLabels {
    /// Reference date plus 30, 60, ... days
    #[default]
    ThirtyDay,
    /// The calendar months following the reference month
    Calendar,
}

/// Tunables for the forecast engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastConfig {
    /// Observed months required before per-category models are fitted
    pub min_history_months: usize,
    /// Share of monthly income assumed spent by the income heuristic
    pub spend_ratio: f64,
    #[serde(default)]
    pub fallback_labels: FallbackLabels,
    /// Share of assumed spending per category; need not sum to one
    pub category_weights: BTreeMap<String, f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let category_weights = [
            ("Housing", 0.3),
            ("Food", 0.15),
            ("Transportation", 0.1),
            ("Utilities", 0.05),
            ("Entertainment", 0.1),
            ("Healthcare", 0.05),
            ("Miscellaneous", 0.2),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

        Self {
            min_history_months: 3,
            spend_ratio: 0.5,
            fallback_labels: FallbackLabels::ThirtyDay,
            category_weights,
        }
    }
}

impl ForecastConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load using the two-layer resolution, or from `path` if given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = path
            .map(Path::to_path_buf)
            .or_else(|| default_config_path().filter(|p| p.exists()));

        match override_path {
            Some(p) => {
                debug!(path = %p.display(), "Loading forecast config");
                let content = match fs::read_to_string(&p) {
                    Ok(content) => content,
                    Err(e) => {
                        let message = format!("Cannot read {}: {}", p.display(), e);
                        return Err(Error::Config(message));
                    }
                };
                Self::from_toml_str(&content)
            }
            None => Self::from_toml_str(DEFAULT_CONFIG),
        }
    }

    /// Weight for a category, zero when unlisted
    pub fn weight(&self, category: &str) -> f64 {
        self.category_weights.get(category).copied().unwrap_or(0.0)
    }

    fn validate(&self) -> Result<()> {
        if self.min_history_months == 0 {
            return Err(Error::Config(
                "min_history_months must be at least 1".to_string(),
            ));
        }
        if !self.spend_ratio.is_finite() || !(0.0..=1.0).contains(&self.spend_ratio) {
            return Err(Error::Config(format!(
                "spend_ratio must be between 0 and 1, got {}",
                self.spend_ratio
            )));
        }
        if let Some((name, weight)) = self
            .category_weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(Error::Config(format!(
                "category weight for {} must be a non-negative number, got {}",
                name, weight
            )));
        }
        Ok(())
    }
}

/// Override location in the platform data directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("spendcast").join("config").join("forecast.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_matches_default() {
        let embedded = ForecastConfig::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(embedded, ForecastConfig::default());
    }

    #[test]
    fn test_weight_lookup() {
        let config = ForecastConfig::default();
        assert_eq!(config.weight("Housing"), 0.3);
        assert_eq!(config.weight("Pets"), 0.0);
    }

    #[test]
    fn test_fallback_labels_default_when_omitted() {
        let config = ForecastConfig::from_toml_str(
            r#"
            min_history_months = 4
            spend_ratio = 0.6

            [category_weights]
            Food = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.fallback_labels, FallbackLabels::ThirtyDay);
        assert_eq!(config.min_history_months, 4);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let zero_months = r#"
            min_history_months = 0
            spend_ratio = 0.5
            [category_weights]
        "#;
        assert!(matches!(
            ForecastConfig::from_toml_str(zero_months),
            Err(Error::Config(_))
        ));

        let bad_ratio = r#"
            min_history_months = 3
            spend_ratio = 1.5
            [category_weights]
        "#;
        assert!(matches!(
            ForecastConfig::from_toml_str(bad_ratio),
            Err(Error::Config(_))
        ));

        let negative_weight = r#"
            min_history_months = 3
            spend_ratio = 0.5
            [category_weights]
            Food = -0.1
        "#;
        assert!(matches!(
            ForecastConfig::from_toml_str(negative_weight),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let typo = r#"
            min_history_months = 3
            spend_ratio = 0.5
            fallback_label = "calendar"
            [category_weights]
        "#;
        assert!(ForecastConfig::from_toml_str(typo).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            min_history_months = 2
            spend_ratio = 0.4
            fallback_labels = "calendar"
            [category_weights]
            Housing = 0.5
            "#
        )
        .unwrap();

        let config = ForecastConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.fallback_labels, FallbackLabels::Calendar);
        assert_eq!(config.spend_ratio, 0.4);
        assert_eq!(config.weight("Food"), 0.0);
    }

    #[test]
    fn test_load_missing_explicit_path_is_config_error() {
        let path = Path::new("/nonexistent/forecast.toml");
        let err = ForecastConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!err.is_infrastructure());
    }
}
