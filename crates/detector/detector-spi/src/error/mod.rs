//! Error types for anomaly detection.

mod detector_error;

pub use detector_error::{DetectorError, Result};
