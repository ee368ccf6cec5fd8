//! # Calculator Configuration
//!
//! Tunable limits, stored as JSON next to the persisted state. A missing
//! file means defaults; every field is optional in the file.
//!
//! ```json
//! {
//!   "history_limit": 50,
//!   "recent_history_display": 10,
//!   "sanity_ceiling_imperial": 1000000.0,
//!   "sanity_ceiling_metric": 100000.0
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSystem;

/// Default history cap
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Calculator-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Most recent history entries kept
    pub history_limit: usize,

    /// Entries shown by default when listing history
    pub recent_history_display: usize,

    /// Largest plausible floor area in sq. ft.
    pub sanity_ceiling_imperial: f64,

    /// Largest plausible floor area in sq. m
    pub sanity_ceiling_metric: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig {
            history_limit: DEFAULT_HISTORY_LIMIT,
            recent_history_display: 10,
            sanity_ceiling_imperial: 1_000_000.0,
            sanity_ceiling_metric: 100_000.0,
        }
    }
}

impl CalculatorConfig {
    /// Plausibility ceiling for floor areas entered in `units`
    pub fn sanity_ceiling(&self, units: UnitSystem) -> f64 {
        match units {
            UnitSystem::Imperial => self.sanity_ceiling_imperial,
            UnitSystem::Metric => self.sanity_ceiling_metric,
        }
    }

    fn validate(&self) -> CalcResult<()> {
        if self.history_limit == 0 {
            return Err(CalcError::invalid_input(
                "history_limit",
                "0",
                "History limit must be at least 1",
            ));
        }
        for (field, value) in [
            ("sanity_ceiling_imperial", self.sanity_ceiling_imperial),
            ("sanity_ceiling_metric", self.sanity_ceiling_metric),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Ceiling must be positive"));
            }
        }
        Ok(())
    }
}

/// Load configuration from a JSON file, falling back to defaults when the
/// file does not exist.
pub fn load_config(path: &Path) -> CalcResult<CalculatorConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CalculatorConfig::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read config", path.display().to_string(), e.to_string()))?;

    let config: CalculatorConfig = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.sanity_ceiling(UnitSystem::Imperial), 1_000_000.0);
        assert_eq!(config.sanity_ceiling(UnitSystem::Metric), 100_000.0);
    }

    #[test]
    fn test_partial_file() {
        let config: CalculatorConfig = serde_json::from_str(r#"{ "history_limit": 20 }"#).unwrap();
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.sanity_ceiling_metric, 100_000.0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_dir().join("egress_calc_test_no_such_config.json");
        let _ = fs::remove_file(&path);
        assert_eq!(load_config(&path).unwrap(), CalculatorConfig::default());
    }

    #[test]
    fn test_load_and_reject_bad_values() {
        let path = temp_dir().join("egress_calc_test_config.json");
        fs::write(&path, r#"{ "sanity_ceiling_metric": 5000.0 }"#).unwrap();
        assert_eq!(load_config(&path).unwrap().sanity_ceiling_metric, 5000.0);

        fs::write(&path, r#"{ "history_limit": 0 }"#).unwrap();
        assert!(load_config(&path).is_err());

        fs::write(&path, "not json").unwrap();
        assert_eq!(load_config(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }
}
