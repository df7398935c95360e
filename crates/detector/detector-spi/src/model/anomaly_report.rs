//! Per-sample detection outcome.

use serde::{Deserialize, Serialize};

/// Outcome for one sample of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Position of the sample in the input series.
    pub index: usize,
    /// The sample value after coercion.
    pub value: f64,
    /// Signed z-score of the sample, `0.0` for a zero-variance series.
    pub score: f64,
    pub is_anomaly: bool,
}
