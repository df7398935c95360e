//! Data models produced by detectors.

mod anomaly_report;
mod detection_report;

pub use anomaly_report::AnomalyReport;
pub use detection_report::DetectionReport;
