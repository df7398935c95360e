//! Contract definitions for anomaly detection.
//!
//! This module contains trait definitions that detectors must implement.

mod series_detector;

pub use series_detector::SeriesDetector;
