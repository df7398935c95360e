//! Series detector trait definition.

use crate::error::Result;
use crate::model::DetectionReport;

/// Flags outliers in a numeric series relative to the series' own
/// distribution.
///
/// Implementations are stateless: every call computes its statistics from
/// the series it is given, so a detector can be shared across threads and
/// called in any order.
pub trait SeriesDetector: Send + Sync {
    /// Flag every sample of `series`.
    ///
    /// The returned report has exactly one entry per sample, in input order.
    fn detect(&self, series: &[f64]) -> Result<DetectionReport>;

    /// Compute per-sample scores without thresholding.
    fn score(&self, series: &[f64]) -> Result<Vec<f64>>;

    /// Threshold applied to scores by [`SeriesDetector::detect`].
    fn threshold(&self) -> f64;
}
