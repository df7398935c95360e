//! Z-Score based anomaly detector

use detector_api::{ZScoreConfig, DEFAULT_THRESHOLD};
use detector_spi::{AnomalyReport, DetectionReport, Result, SeriesDetector};
use serde::{Deserialize, Serialize};

use crate::stats::SeriesStats;

/// Z-Score based anomaly detector
///
/// Flags samples whose absolute deviation from the series mean exceeds
/// `threshold` population standard deviations. Mean and deviation are
/// computed once over the whole series handed to each call.
///
/// @algorithm ZScore
/// @category StatisticalDetector
/// @complexity O(n) detect
/// @thread_safe true
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreDetector {
    threshold: f64,
}

impl ZScoreDetector {
    /// Create a new Z-Score detector
    ///
    /// # Arguments
    ///
    /// * `threshold` - Number of standard deviations for anomaly threshold
    pub fn new(threshold: f64) -> Result<Self> {
        Self::from_config(ZScoreConfig::new(threshold))
    }

    /// Create from configuration.
    pub fn from_config(config: ZScoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            threshold: config.threshold,
        })
    }
}

impl Default for ZScoreDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl SeriesDetector for ZScoreDetector {
    fn detect(&self, series: &[f64]) -> Result<DetectionReport> {
        let stats = SeriesStats::compute(series)?;

        let reports = series
            .iter()
            .enumerate()
            .map(|(index, &value)| AnomalyReport {
                index,
                value,
                score: stats.z_score(value),
                is_anomaly: stats.exceeds(value, self.threshold),
            })
            .collect();

        Ok(DetectionReport {
            reports,
            threshold: self.threshold,
            mean: stats.mean,
            std_dev: stats.std_dev,
        })
    }

    fn score(&self, series: &[f64]) -> Result<Vec<f64>> {
        let stats = SeriesStats::compute(series)?;
        Ok(series.iter().map(|&x| stats.z_score(x)).collect())
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }
}
