//! Detector API
//!
//! Configuration types for anomaly detection.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use detector_spi::{AnomalyReport, DetectionReport, DetectorError, Result, SeriesDetector};

/// Environment variable holding the default z-score threshold.
pub const THRESHOLD_ENV: &str = "ATTENDIFY_ANOMALY_THRESHOLD";

/// Default number of standard deviations beyond which a sample is flagged.
pub const DEFAULT_THRESHOLD: f64 = 2.0;

// ============================================================================
// Detector Configuration
// ============================================================================

/// Z-Score detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZScoreConfig {
    /// Z-score threshold for anomaly detection (default: 2.0).
    pub threshold: f64,
}

impl Default for ZScoreConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ZScoreConfig {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Load from the process environment, falling back to the default when
    /// [`THRESHOLD_ENV`] is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match lookup(THRESHOLD_ENV) {
            Some(raw) => {
                let threshold = raw.trim().parse::<f64>().map_err(|_| {
                    DetectorError::invalid_parameter(
                        THRESHOLD_ENV,
                        format!("'{}' is not a number", raw),
                    )
                })?;
                Self::new(threshold)
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the threshold is a finite, positive number.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() {
            return Err(DetectorError::invalid_parameter(
                "threshold",
                "must be finite",
            ));
        }
        if self.threshold <= 0.0 {
            return Err(DetectorError::invalid_parameter(
                "threshold",
                "must be positive",
            ));
        }
        Ok(())
    }
}
