//! Roster-wide risk profile evaluation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::profile::{ProfileAnalysis, RiskLevel, RiskProfileAnalyzer, StudentRiskProfile};

/// Selects which profiles to evaluate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterFilter {
    /// Only profiles with this risk level; all levels when `None`.
    pub risk_level: Option<RiskLevel>,
    /// Case-insensitive substring of name or student id.
    pub search: Option<String>,
}

impl RosterFilter {
    pub fn matches(&self, profile: &StudentRiskProfile) -> bool {
        let level_ok = self.risk_level.map_or(true, |level| profile.risk_level == level);
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |term| profile.matches_search(term));
        level_ok && search_ok
    }
}

/// Analysis outcome for one student.
#[derive(Debug)]
pub struct RosterEntry {
    pub student_id: String,
    pub result: Result<ProfileAnalysis>,
}

/// Analyse every profile that passes `filter`, in parallel.
///
/// Entries come back in roster order. A failing profile yields an error
/// entry and does not affect the others.
pub fn analyze_roster(
    analyzer: &RiskProfileAnalyzer,
    profiles: &[StudentRiskProfile],
    filter: &RosterFilter,
) -> Vec<RosterEntry> {
    let entries: Vec<RosterEntry> = profiles
        .par_iter()
        .filter(|p| filter.matches(p))
        .map(|profile| RosterEntry {
            student_id: profile.student_id.clone(),
            result: analyzer.analyze(profile),
        })
        .collect();

    let failed = entries.iter().filter(|e| e.result.is_err()).count();
    let flagged = entries
        .iter()
        .filter(|e| matches!(&e.result, Ok(a) if a.has_anomalies()))
        .count();

    if failed > 0 {
        warn!(failed, "some profiles could not be analysed");
    }
    info!(
        evaluated = entries.len(),
        flagged,
        failed,
        "roster analysis complete"
    );

    entries
}
