//! Daily anomaly notification and flag-volume monitoring.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use detector_facade::{DetectorError, SeriesDetector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AttendanceError, Result};
use crate::review::FlaggedRecord;

/// Records flagged on or after `today`.
pub fn todays_anomalies(records: &[FlaggedRecord], today: NaiveDate) -> Vec<&FlaggedRecord> {
    records.iter().filter(|r| r.date >= today).collect()
}

/// Banner text for today's anomalies, `None` when there are none.
pub fn notification_message(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 attendance anomaly detected today.".to_string()),
        n => Some(format!("{} attendance anomalies detected today.", n)),
    }
}

/// Number of records flagged on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFlagCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Longest first-to-last date span, in days, accepted by
/// [`daily_flag_counts`]. Roughly ten school years.
pub const MAX_FLAG_SPAN_DAYS: i64 = 3660;

/// Per-day flag counts from the earliest to the latest record date.
///
/// Days without records are included with a zero count so the series is
/// evenly spaced. Fails with [`AttendanceError::DateSpanTooLong`] when the
/// dates are more than [`MAX_FLAG_SPAN_DAYS`] apart.
pub fn daily_flag_counts(records: &[FlaggedRecord]) -> Result<Vec<DailyFlagCount>> {
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in records {
        *by_day.entry(r.date).or_default() += 1;
    }

    let (Some(&first), Some(&last)) = (by_day.keys().next(), by_day.keys().next_back()) else {
        return Ok(Vec::new());
    };
    if (last - first).num_days() > MAX_FLAG_SPAN_DAYS {
        return Err(AttendanceError::DateSpanTooLong {
            first,
            last,
            limit: MAX_FLAG_SPAN_DAYS,
        });
    }

    Ok(first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|date| DailyFlagCount {
            date,
            count: by_day.get(&date).copied().unwrap_or(0),
        })
        .collect())
}

/// A day whose flag volume is an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeAnomaly {
    pub date: NaiveDate,
    pub count: usize,
    pub score: f64,
}

/// Days on which the number of flagged records is unusual.
pub fn flag_volume_anomalies<D: SeriesDetector>(
    detector: &D,
    records: &[FlaggedRecord],
) -> Result<Vec<VolumeAnomaly>> {
    let counts = daily_flag_counts(records)?;
    if counts.is_empty() {
        return Err(DetectorError::EmptySeries.into());
    }

    let series: Vec<f64> = counts.iter().map(|c| c.count as f64).collect();
    let report = detector.detect(&series)?;
    debug!(
        days = counts.len(),
        mean = report.mean,
        std_dev = report.std_dev,
        "daily flag volume evaluated"
    );

    let anomalies: Vec<VolumeAnomaly> = report
        .anomalies()
        .map(|r| VolumeAnomaly {
            date: counts[r.index].date,
            count: counts[r.index].count,
            score: r.score,
        })
        .collect();

    for a in &anomalies {
        warn!(date = %a.date, count = a.count, score = a.score, "unusual flag volume");
    }
    Ok(anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::ReviewStatus;
    use detector_facade::ZScoreDetector;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn record(id: u64, date: NaiveDate) -> FlaggedRecord {
        FlaggedRecord {
            id,
            student_id: format!("STU{:03}", id),
            student_name: format!("Student {}", id),
            date,
            reason: "Irregular Pattern".to_string(),
            risk_score: 60,
            status: ReviewStatus::Pending,
            details: String::new(),
        }
    }

    #[test]
    fn test_todays_anomalies() {
        let records = vec![record(1, day(9)), record(2, day(10)), record(3, day(10))];
        let today = todays_anomalies(&records, day(10));
        assert_eq!(today.len(), 2);
        assert!(today.iter().all(|r| r.date == day(10)));
        assert!(todays_anomalies(&records, day(11)).is_empty());
    }

    #[test]
    fn test_notification_message() {
        assert_eq!(notification_message(0), None);
        assert_eq!(
            notification_message(1).as_deref(),
            Some("1 attendance anomaly detected today.")
        );
        assert_eq!(
            notification_message(4).as_deref(),
            Some("4 attendance anomalies detected today.")
        );
    }

    #[test]
    fn test_daily_counts_fill_gaps() {
        let records = vec![record(1, day(3)), record(2, day(1)), record(3, day(3))];
        let counts = daily_flag_counts(&records).unwrap();
        assert_eq!(
            counts,
            vec![
                DailyFlagCount { date: day(1), count: 1 },
                DailyFlagCount { date: day(2), count: 0 },
                DailyFlagCount { date: day(3), count: 2 },
            ]
        );
    }

    #[test]
    fn test_daily_counts_empty() {
        assert!(daily_flag_counts(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_daily_counts_reject_long_span() {
        let first = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        let records = vec![record(1, first), record(2, day(10))];
        let err = daily_flag_counts(&records).unwrap_err();
        assert!(matches!(
            err,
            AttendanceError::DateSpanTooLong { limit: MAX_FLAG_SPAN_DAYS, .. }
        ));

        let err = flag_volume_anomalies(&ZScoreDetector::default(), &records).unwrap_err();
        assert!(matches!(err, AttendanceError::DateSpanTooLong { .. }));
    }

    #[test]
    fn test_daily_counts_at_span_limit() {
        let first = day(1);
        let last = first + chrono::Duration::days(MAX_FLAG_SPAN_DAYS);
        let counts = daily_flag_counts(&[record(1, first), record(2, last)]).unwrap();
        assert_eq!(counts.len() as i64, MAX_FLAG_SPAN_DAYS + 1);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_volume_spike_detected() {
        let mut records = Vec::new();
        let mut id = 0;
        for d in 1..=12 {
            let n = if d == 8 { 15 } else { 2 };
            for _ in 0..n {
                id += 1;
                records.push(record(id, day(d)));
            }
        }

        let anomalies = flag_volume_anomalies(&ZScoreDetector::default(), &records).unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].date, day(8));
        assert_eq!(anomalies[0].count, 15);
        assert!(anomalies[0].score > 2.0);
    }

    #[test]
    fn test_volume_without_records() {
        let err = flag_volume_anomalies(&ZScoreDetector::default(), &[]).unwrap_err();
        assert!(matches!(err, AttendanceError::Detector(DetectorError::EmptySeries)));
    }
}
