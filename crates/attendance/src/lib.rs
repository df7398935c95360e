//! # attendance
//!
//! Attendance-domain callers of the series detector: per-student risk
//! profile analysis, roster-wide evaluation, flagged-record review and the
//! daily anomaly notification.

mod error;
mod notification;
mod profile;
mod review;
mod roster;

pub use error::{AttendanceError, Result};
pub use notification::{
    daily_flag_counts, flag_volume_anomalies, notification_message, todays_anomalies,
    DailyFlagCount, VolumeAnomaly, MAX_FLAG_SPAN_DAYS,
};
pub use profile::{
    AlertSeverity, FlaggedWeek, ProfileAnalysis, RiskLevel, RiskProfileAnalyzer,
    StudentRiskProfile, FALLBACK_WEEKLY_ATTENDANCE,
};
pub use review::{FlaggedRecord, ReviewQueue, ReviewStatus, ReviewSummary, RiskBand};
pub use roster::{analyze_roster, RosterEntry, RosterFilter};
