//! Whole-series detection result.

use serde::{Deserialize, Serialize};

use super::AnomalyReport;

/// Result of running a detector over one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// One entry per input sample, in input order.
    pub reports: Vec<AnomalyReport>,
    /// Threshold used for flagging, in standard deviations.
    pub threshold: f64,
    /// Mean of the whole series.
    pub mean: f64,
    /// Population standard deviation of the whole series.
    pub std_dev: f64,
}

impl DetectionReport {
    /// Number of samples evaluated.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Iterate over flagged samples only.
    pub fn anomalies(&self) -> impl Iterator<Item = &AnomalyReport> {
        self.reports.iter().filter(|r| r.is_anomaly)
    }

    /// Get indices of flagged samples.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.anomalies().map(|r| r.index).collect()
    }

    /// Count of flagged samples.
    pub fn anomaly_count(&self) -> usize {
        self.anomalies().count()
    }

    /// Boolean mask with one flag per sample.
    pub fn mask(&self) -> Vec<bool> {
        self.reports.iter().map(|r| r.is_anomaly).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(flags: &[bool]) -> DetectionReport {
        DetectionReport {
            reports: flags
                .iter()
                .enumerate()
                .map(|(index, &is_anomaly)| AnomalyReport {
                    index,
                    value: index as f64,
                    score: 0.0,
                    is_anomaly,
                })
                .collect(),
            threshold: 2.0,
            mean: 0.0,
            std_dev: 0.0,
        }
    }

    #[test]
    fn test_anomaly_indices() {
        let r = report(&[false, true, false, true]);
        assert_eq!(r.anomaly_indices(), vec![1, 3]);
        assert_eq!(r.anomaly_count(), 2);
        assert_eq!(r.mask(), vec![false, true, false, true]);
    }

    #[test]
    fn test_no_anomalies() {
        let r = report(&[false, false]);
        assert!(r.anomaly_indices().is_empty());
        assert_eq!(r.len(), 2);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_serializes_snake_case_fields() {
        let r = report(&[true]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["reports"][0]["is_anomaly"], true);
        assert_eq!(json["reports"][0]["index"], 0);
        assert_eq!(json["threshold"], 2.0);
    }
}
