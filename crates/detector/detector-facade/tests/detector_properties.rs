//! Property tests for the z-score detector

use detector_facade::prelude::*;
use proptest::prelude::*;

fn series_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..100.0, 1..64)
}

proptest! {
    #[test]
    fn prop_length_and_order_preserved(series in series_strategy(), k in 0.1f64..5.0) {
        let report = detect(&series, k).unwrap();
        prop_assert_eq!(report.len(), series.len());
        for (i, r) in report.reports.iter().enumerate() {
            prop_assert_eq!(r.index, i);
            prop_assert_eq!(r.value, series[i]);
        }
    }

    #[test]
    fn prop_flags_shrink_as_threshold_grows(
        series in series_strategy(),
        k1 in 0.1f64..5.0,
        delta in 0.0f64..5.0,
    ) {
        let k2 = k1 + delta;
        let loose = detect(&series, k1).unwrap();
        let strict = detect(&series, k2).unwrap();

        for (l, s) in loose.reports.iter().zip(strict.reports.iter()) {
            prop_assert!(!s.is_anomaly || l.is_anomaly);
        }
    }

    #[test]
    fn prop_constant_series_never_flagged(value in -1e6f64..1e6, n in 1usize..64, k in 0.1f64..5.0) {
        let report = detect(&vec![value; n], k).unwrap();
        prop_assert_eq!(report.anomaly_count(), 0);
    }

    #[test]
    fn prop_score_bounded_by_sample_count(series in series_strategy()) {
        let bound = ((series.len() - 1) as f64).sqrt();
        let report = detect(&series, 1.0).unwrap();
        for r in &report.reports {
            prop_assert!(r.score.abs() <= bound + 1e-9);
        }
    }

    #[test]
    fn prop_detection_is_deterministic(series in series_strategy(), k in 0.1f64..5.0) {
        prop_assert_eq!(detect(&series, k).unwrap(), detect(&series, k).unwrap());
    }
}
