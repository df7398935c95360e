//! End-to-end tests for the detector facade
//!
//! Tests complete detection workflows using only the facade's API.

use detector_facade::{
    coerce_series, DetectorError, SeriesDetector, ZScoreConfig, ZScoreDetector,
};
use serde_json::json;

fn weekly_payload() -> serde_json::Value {
    json!({
        "student_id": "STU001",
        "weekly_attendance": [92, "90", 91, 93, 89, 90, 40, 92, 91, 90]
    })
}

#[test]
fn e2e_payload_to_flagged_weeks() {
    let payload = weekly_payload();
    let values = payload["weekly_attendance"].as_array().unwrap();

    let series = coerce_series(values).unwrap();
    let detector = ZScoreDetector::from_config(ZScoreConfig::default()).unwrap();
    let report = detector.detect(&series).unwrap();

    assert_eq!(report.len(), 10);
    assert_eq!(report.anomaly_indices(), vec![6]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["reports"][6]["is_anomaly"], true);
    assert_eq!(json["reports"][6]["value"], 40.0);
}

#[test]
fn e2e_threshold_sensitivity() {
    let series: Vec<f64> = (0..30)
        .map(|i| 80.0 + ((i * 7) % 11) as f64 - 5.0)
        .chain([20.0, 99.0])
        .collect();

    let strict = ZScoreDetector::new(3.0).unwrap().detect(&series).unwrap();
    let lenient = ZScoreDetector::new(1.0).unwrap().detect(&series).unwrap();

    assert!(lenient.anomaly_count() >= strict.anomaly_count());
    assert!(strict.anomaly_indices().iter().all(|i| lenient.anomaly_indices().contains(i)));
}

#[test]
fn e2e_config_from_environment_lookup() {
    let config = ZScoreConfig::from_lookup(|key| {
        assert_eq!(key, "ATTENDIFY_ANOMALY_THRESHOLD");
        Some("1.5".to_string())
    })
    .unwrap();
    let detector = ZScoreDetector::from_config(config).unwrap();
    let report = detector.detect(&[80.0, 82.0, 79.0, 81.0, 5.0]).unwrap();

    assert_eq!(report.threshold, 1.5);
    assert_eq!(report.anomaly_indices(), vec![4]);
}

#[test]
fn e2e_bad_payload_reports_position() {
    let values = vec![json!(90), json!(88), json!(null), json!("n/a")];
    match coerce_series(&values) {
        Err(DetectorError::InvalidInput { index, .. }) => assert_eq!(index, 2),
        other => panic!("unexpected result: {:?}", other),
    }
}
