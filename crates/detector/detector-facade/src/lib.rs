//! Detector Facade
//!
//! High-level, simplified API for anomaly detection.
//!
//! This facade provides a single entry point to all detection functionality:
//! - `SeriesDetector` trait, report types and errors from SPI
//! - Configuration types from API
//! - `ZScoreDetector`, coercion helpers and the `detect` functions from Core

// Re-export everything from SPI
pub use detector_spi::*;

// Re-export everything from API
pub use detector_api::*;

// Re-export everything from Core
pub use detector_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{detect, detect_values};
    pub use crate::{AnomalyReport, DetectionReport};
    pub use crate::{DetectorError, Result};
    pub use crate::{SeriesDetector, ZScoreConfig, ZScoreDetector};
}
