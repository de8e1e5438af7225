use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Numeric knobs of a topology check run.
///
/// All values are in map units of the checked dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Intersection epsilon. Distances and determinants below it are treated as zero.
    pub tolerance: f64,
    /// Overlaps with area above this value are reported. `0.0` reports any positive overlap.
    pub overlap_threshold: f64,
    /// Gaps with area above this value are reported.
    pub gap_threshold: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            overlap_threshold: 0.01,
            gap_threshold: 0.01,
        }
    }
}

impl ToleranceConfig {
    /// Creates a new configuration, checking that every value is finite and not negative.
    pub fn new(
        tolerance: f64,
        overlap_threshold: f64,
        gap_threshold: f64,
    ) -> Result<Self, ConfigError> {
        Self {
            tolerance,
            overlap_threshold,
            gap_threshold,
        }
        .validated()
    }

    /// Returns the same configuration if all its values are usable.
    pub fn validated(self) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("tolerance", self.tolerance),
            ("overlap_threshold", self.overlap_threshold),
            ("gap_threshold", self.gap_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeOrNonFinite { name, value });
            }
        }

        Ok(self)
    }

    /// Sets intersection epsilon.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets overlap area threshold.
    pub fn with_overlap_threshold(mut self, threshold: f64) -> Self {
        self.overlap_threshold = threshold;
        self
    }

    /// Sets gap area threshold.
    pub fn with_gap_threshold(mut self, threshold: f64) -> Self {
        self.gap_threshold = threshold;
        self
    }

    /// Areas at or below this value are floating point noise rather than real overlaps.
    pub(crate) fn area_noise_floor(&self) -> f64 {
        self.tolerance * self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults() {
        let config = ToleranceConfig::default();
        assert_eq!(config.tolerance, 1e-4);
        assert_eq!(config.overlap_threshold, 0.01);
        assert_eq!(config.gap_threshold, 0.01);
        assert_eq!(config.validated(), Ok(config));
    }

    #[test]
    fn rejects_bad_values() {
        assert_matches!(
            ToleranceConfig::new(-1.0, 0.0, 0.0),
            Err(ConfigError::NegativeOrNonFinite {
                name: "tolerance",
                ..
            })
        );
        assert_matches!(
            ToleranceConfig::new(0.0, f64::NAN, 0.0),
            Err(ConfigError::NegativeOrNonFinite {
                name: "overlap_threshold",
                ..
            })
        );
        assert_matches!(
            ToleranceConfig::default()
                .with_gap_threshold(f64::INFINITY)
                .validated(),
            Err(ConfigError::NegativeOrNonFinite {
                name: "gap_threshold",
                ..
            })
        );
        assert!(ToleranceConfig::new(0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn deserialize_partial() {
        let config: ToleranceConfig =
            serde_json::from_str(r#"{"gap_threshold": 5.0}"#).expect("valid json");
        assert_eq!(config.gap_threshold, 5.0);
        assert_eq!(config.tolerance, 1e-4);
        assert_eq!(config.overlap_threshold, 0.01);
    }
}
