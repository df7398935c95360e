//! Detector Service Provider Interface
//!
//! Defines the detector contract, the report types it produces and the
//! errors it can fail with.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::SeriesDetector;
pub use error::{DetectorError, Result};
pub use model::{AnomalyReport, DetectionReport};
