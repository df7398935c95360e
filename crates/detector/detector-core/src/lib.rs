//! Detector Core
//!
//! Statistics, input coercion and the z-score detector implementation.

mod coerce;
mod stats;
mod zscore;

pub use coerce::{coerce_series, coerce_value, ensure_finite};
pub use stats::SeriesStats;
pub use zscore::ZScoreDetector;

use detector_spi::{DetectionReport, Result, SeriesDetector};

/// Flag every sample of `series` whose distance from the series mean is
/// more than `k` population standard deviations.
///
/// ```
/// let report = detector_core::detect(&[85.0, 80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 65.0], 2.0).unwrap();
/// assert_eq!(report.len(), 8);
/// assert_eq!(report.anomaly_count(), 0);
/// ```
pub fn detect(series: &[f64], k: f64) -> Result<DetectionReport> {
    ZScoreDetector::new(k)?.detect(series)
}

/// Same as [`detect`] for loosely typed input such as a JSON payload.
///
/// Numbers are taken as-is and strings are parsed; anything else fails
/// with [`detector_spi::DetectorError::InvalidInput`].
pub fn detect_values(values: &[serde_json::Value], k: f64) -> Result<DetectionReport> {
    let detector = ZScoreDetector::new(k)?;
    let series = coerce_series(values)?;
    detector.detect(&series)
}
