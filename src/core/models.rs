// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Core Data Models ---

// The severity level of a finding. Declaration order doubles as ranking,
// highest first, so the derived `Ord` sorts High before Medium before Low.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// A single finding produced by a probe.
///
/// `kind` is a stable, probe-defined identifier (serialized as `type`); the
/// same kind may appear several times in one scan when several resources
/// trigger the same check. An issue is never modified after emission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub recommendation: String,
}

/// Severity counts plus the normalized 0-100 percentage for one issue set.
///
/// Always recomputable from the issues that produced it, so it is carried
/// alongside them rather than persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskScore {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub percentage: u8,
}

/// Severity weights for the risk percentage.
const HIGH_WEIGHT: usize = 10;
const MEDIUM_WEIGHT: usize = 5;
const LOW_WEIGHT: usize = 1;

impl RiskScore {
    /// Computes the weighted risk score for a set of issues.
    ///
    /// The percentage is the weighted severity sum over the worst case where
    /// every issue is high severity, rounded and clamped to 100. An empty
    /// issue set scores 0.
    pub fn from_issues(issues: &[Issue]) -> Self {
        let high = issues.iter().filter(|i| i.severity == Severity::High).count();
        let medium = issues.iter().filter(|i| i.severity == Severity::Medium).count();
        let low = issues.iter().filter(|i| i.severity == Severity::Low).count();
        let total = issues.len();

        let score = high * HIGH_WEIGHT + medium * MEDIUM_WEIGHT + low * LOW_WEIGHT;
        let max_score = (total * HIGH_WEIGHT).max(1);
        let percentage = ((score as f64 / max_score as f64) * 100.0).round().min(100.0) as u8;

        Self { total, high, medium, low, percentage }
    }
}

/// The complete outcome of one scan run.
///
/// Issues appear in fixed probe order, each probe's findings in emission
/// order. `account_id` is best-effort and absent when the key cannot read
/// the account. Serialized in the shape the report tooling expects, with an
/// epoch-millisecond timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub issues: Vec<Issue>,
    pub risk_score: RiskScore,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}
