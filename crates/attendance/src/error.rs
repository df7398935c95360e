//! Attendance error types.

use chrono::NaiveDate;
use detector_facade::DetectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Detection failed: {0}")]
    Detector(#[from] DetectorError),

    #[error("Flagged record {id} not found")]
    RecordNotFound { id: u64 },

    #[error("Flagged records span {first} to {last}, more than {limit} days")]
    DateSpanTooLong {
        first: NaiveDate,
        last: NaiveDate,
        limit: i64,
    },
}

/// Result type for attendance operations.
pub type Result<T> = std::result::Result<T, AttendanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_detector_error() {
        let error: AttendanceError = DetectorError::EmptySeries.into();
        assert_eq!(
            error.to_string(),
            "Detection failed: Empty series: at least one sample is required"
        );
    }

    #[test]
    fn test_record_not_found_display() {
        let error = AttendanceError::RecordNotFound { id: 9 };
        assert_eq!(error.to_string(), "Flagged record 9 not found");
    }

    #[test]
    fn test_date_span_display() {
        let error = AttendanceError::DateSpanTooLong {
            first: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
            last: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            limit: 3660,
        };
        assert_eq!(
            error.to_string(),
            "Flagged records span 2001-01-01 to 2024-06-10, more than 3660 days"
        );
    }
}
