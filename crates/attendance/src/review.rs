//! Review queue for flagged attendance records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AttendanceError, Result};

/// Reviewer decision on a flagged record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Confirmed,
    FalsePositive,
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(ReviewStatus::Pending),
            "confirmed" => Ok(ReviewStatus::Confirmed),
            "false_positive" => Ok(ReviewStatus::FalsePositive),
            other => Err(format!(
                "Unknown status: {}. Use pending, confirmed or false_positive",
                other
            )),
        }
    }
}

/// Band of a 0-100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => RiskBand::Critical,
            75..=89 => RiskBand::High,
            50..=74 => RiskBand::Medium,
            _ => RiskBand::Low,
        }
    }
}

/// A record flagged by the attendance service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedRecord {
    pub id: u64,
    pub student_id: String,
    pub student_name: String,
    pub date: NaiveDate,
    pub reason: String,
    pub risk_score: u8,
    #[serde(default = "default_status")]
    pub status: ReviewStatus,
    #[serde(default)]
    pub details: String,
}

fn default_status() -> ReviewStatus {
    ReviewStatus::Pending
}

impl FlaggedRecord {
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }
}

/// Counts shown at the top of the review screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub total: usize,
    pub pending: usize,
    /// Records in the critical band.
    pub high_risk: usize,
    pub false_positives: usize,
}

/// In-memory set of flagged records under review.
#[derive(Debug, Clone, Default)]
pub struct ReviewQueue {
    records: Vec<FlaggedRecord>,
}

impl ReviewQueue {
    pub fn new(records: Vec<FlaggedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FlaggedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FlaggedRecord> {
        self.records
    }

    /// Record a reviewer decision.
    pub fn override_status(&mut self, id: u64, status: ReviewStatus) -> Result<&FlaggedRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AttendanceError::RecordNotFound { id })?;
        info!(id, from = ?record.status, to = ?status, "review status overridden");
        record.status = status;
        Ok(record)
    }

    /// Records matching a case-insensitive search on name or student id,
    /// optionally restricted to one reason. `"all"` matches every reason.
    pub fn filter(&self, search: &str, reason: Option<&str>) -> Vec<&FlaggedRecord> {
        let term = search.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.student_name.to_lowercase().contains(&term)
                    || r.student_id.to_lowercase().contains(&term)
            })
            .filter(|r| match reason {
                None | Some("all") => true,
                Some(reason) => r.reason == reason,
            })
            .collect()
    }

    /// Distinct reasons, in order of first appearance.
    pub fn reasons(&self) -> Vec<&str> {
        let mut reasons: Vec<&str> = Vec::new();
        for r in &self.records {
            if !reasons.contains(&r.reason.as_str()) {
                reasons.push(&r.reason);
            }
        }
        reasons
    }

    pub fn summary(&self) -> ReviewSummary {
        ReviewSummary {
            total: self.records.len(),
            pending: self.count_status(ReviewStatus::Pending),
            high_risk: self
                .records
                .iter()
                .filter(|r| r.risk_band() == RiskBand::Critical)
                .count(),
            false_positives: self.count_status(ReviewStatus::FalsePositive),
        }
    }

    fn count_status(&self, status: ReviewStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }
}
