//! Per-student risk profile analysis.

use std::borrow::Cow;

use detector_facade::{coerce_series, DetectionReport, SeriesDetector, ZScoreConfig, ZScoreDetector};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::Result;

/// Weekly attendance used when a profile carries no history of its own.
pub const FALLBACK_WEEKLY_ATTENDANCE: [f64; 8] = [85.0, 80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 65.0];

/// Score beyond which a flagged week is reported as critical.
const CRITICAL_SCORE: f64 = 3.0;

/// Risk level assigned by the attendance service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("Unknown risk level: {}. Use low, medium or high", other)),
        }
    }
}

/// A student's risk profile as served by the attendance API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRiskProfile {
    pub student_id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub attendance_rate: Option<f64>,
    /// Raw weekly percentages; elements may arrive as numbers or strings.
    #[serde(default)]
    pub weekly_attendance: Option<Vec<Value>>,
}

impl StudentRiskProfile {
    /// Weekly history as numbers, substituting the fallback when absent.
    ///
    /// Returns the series and whether the fallback was used.
    pub fn weekly_series(&self) -> Result<(Cow<'_, [f64]>, bool)> {
        match &self.weekly_attendance {
            Some(values) => Ok((Cow::Owned(coerce_series(values)?), false)),
            None => Ok((Cow::Borrowed(&FALLBACK_WEEKLY_ATTENDANCE[..]), true)),
        }
    }

    /// Case-insensitive match on name or student id.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.student_id.to_lowercase().contains(&term)
    }
}

/// Alert severity for a flagged week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn from_score(score: f64) -> Self {
        if score.abs() > CRITICAL_SCORE {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        }
    }
}

/// A week whose attendance is an outlier for that student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedWeek {
    /// Zero-based position in the weekly series.
    pub index: usize,
    /// Display label, e.g. "Week 3".
    pub label: String,
    pub attendance: f64,
    pub score: f64,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Outcome of analysing one risk profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub student_id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    /// True when the profile had no weekly history and the fallback was used.
    pub used_fallback: bool,
    pub detection: DetectionReport,
    pub flagged_weeks: Vec<FlaggedWeek>,
}

impl ProfileAnalysis {
    pub fn has_anomalies(&self) -> bool {
        !self.flagged_weeks.is_empty()
    }
}

/// Runs the detector over students' weekly attendance.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskProfileAnalyzer {
    detector: ZScoreDetector,
}

impl RiskProfileAnalyzer {
    pub fn new(detector: ZScoreDetector) -> Self {
        Self { detector }
    }

    /// Create from configuration.
    pub fn from_config(config: ZScoreConfig) -> Result<Self> {
        Ok(Self::new(ZScoreDetector::from_config(config)?))
    }

    pub fn detector(&self) -> &ZScoreDetector {
        &self.detector
    }

    /// Analyse one profile.
    pub fn analyze(&self, profile: &StudentRiskProfile) -> Result<ProfileAnalysis> {
        let (series, used_fallback) = profile.weekly_series()?;
        if used_fallback {
            debug!(student_id = %profile.student_id, "no weekly history, using fallback series");
        }

        let detection = self.detector.detect(&series)?;
        let flagged_weeks: Vec<FlaggedWeek> = detection
            .anomalies()
            .map(|r| {
                let label = format!("Week {}", r.index + 1);
                FlaggedWeek {
                    message: format!(
                        "{}: attendance {:.1}% is {:.2} standard deviations from the mean of {:.1}%",
                        label, r.value, r.score, detection.mean
                    ),
                    index: r.index,
                    label,
                    attendance: r.value,
                    score: r.score,
                    severity: AlertSeverity::from_score(r.score),
                }
            })
            .collect();

        if !flagged_weeks.is_empty() {
            info!(
                student_id = %profile.student_id,
                flagged = flagged_weeks.len(),
                "irregular weekly attendance"
            );
        }

        Ok(ProfileAnalysis {
            student_id: profile.student_id.clone(),
            name: profile.name.clone(),
            risk_level: profile.risk_level,
            used_fallback,
            detection,
            flagged_weeks,
        })
    }
}
