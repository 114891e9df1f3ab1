//! Compliance reports
//!
//! A report is derived entirely from its issue list: level, score and
//! recommendations are recomputed whenever the list changes. Resolving an
//! issue builds a new report rather than editing this one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::types::{ComplianceIssue, ComplianceLevel, RuleCategory};

/// Extra deduction per issue in strict mode.
const STRICT_PENALTY: u32 = 5;

/// Issue count above which a full review is recommended.
const FULL_REVIEW_THRESHOLD: usize = 5;

const ALL_CLEAR: [&str; 2] = [
    "No compliance issues detected",
    "Content is ready to use; keep an eye on future edits",
];

/// Result of one compliance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub overall_level: ComplianceLevel,
    pub issues: Vec<ComplianceIssue>,
    pub score: u32,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub strict_mode: bool,
}

impl ComplianceReport {
    pub fn from_issues(issues: Vec<ComplianceIssue>, strict_mode: bool) -> Self {
        Self {
            overall_level: overall_level(&issues),
            score: compute_score(&issues, strict_mode),
            recommendations: build_recommendations(&issues),
            issues,
            timestamp: Utc::now(),
            strict_mode,
        }
    }

    /// New report without the given issue; unknown ids leave the list as-is.
    pub fn resolve_issue(&self, issue_id: Uuid) -> Self {
        let remaining = self
            .issues
            .iter()
            .filter(|issue| issue.id != issue_id)
            .cloned()
            .collect();
        Self::from_issues(remaining, self.strict_mode)
    }

    pub fn is_safe(&self) -> bool {
        self.overall_level == ComplianceLevel::Safe
    }

    pub fn issue_count_by_level(&self) -> BTreeMap<ComplianceLevel, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.level).or_insert(0) += 1;
        }
        counts
    }

    /// Categories present, in taxonomy order.
    pub fn categories(&self) -> Vec<RuleCategory> {
        RuleCategory::ALL
            .into_iter()
            .filter(|c| self.issues.iter().any(|i| i.category == *c))
            .collect()
    }
}

/// Worst level present, `Safe` when there are no issues.
pub fn overall_level(issues: &[ComplianceIssue]) -> ComplianceLevel {
    issues
        .iter()
        .map(|issue| issue.level)
        .max()
        .unwrap_or(ComplianceLevel::Safe)
}

/// 100 minus per-issue penalties, clamped to 0-100.
pub fn compute_score(issues: &[ComplianceIssue], strict_mode: bool) -> u32 {
    let penalty: u32 = issues
        .iter()
        .map(|issue| {
            let extra = if strict_mode { STRICT_PENALTY } else { 0 };
            issue.level.penalty() + extra
        })
        .sum();
    100u32.saturating_sub(penalty)
}

pub fn build_recommendations(issues: &[ComplianceIssue]) -> Vec<String> {
    if issues.is_empty() {
        return ALL_CLEAR.iter().map(|s| s.to_string()).collect();
    }

    let mut recommendations = Vec::new();
    let lead = match overall_level(issues) {
        ComplianceLevel::Unsafe => {
            "Urgent: remove the unsafe content before publishing and seek legal advice if unsure"
        }
        ComplianceLevel::Warning => "Fix the flagged warnings before releasing this content",
        ComplianceLevel::Caution => "Review the flagged items and adjust them where needed",
        ComplianceLevel::Safe => "Only minor notes were found; no action is required",
    };
    recommendations.push(lead.to_string());

    for category in RuleCategory::ALL {
        if issues.iter().any(|issue| issue.category == category) {
            recommendations.push(category_recommendation(category).to_string());
        }
    }

    if issues.len() > FULL_REVIEW_THRESHOLD {
        recommendations.push(
            "Many issues were found; a full review of the content is recommended".to_string(),
        );
    }

    recommendations
}

fn category_recommendation(category: RuleCategory) -> &'static str {
    match category {
        RuleCategory::Copyright => {
            "Copyright: describe the sound you want instead of naming existing works"
        }
        RuleCategory::Trademark => "Trademark: replace brand names with generic wording",
        RuleCategory::InappropriateContent => {
            "Content: soften or remove language that breaks platform guidelines"
        }
        RuleCategory::CommercialUse => "Commercial use: confirm licence terms before monetising",
        RuleCategory::Privacy => "Privacy: strip personal data from titles, lyrics and tags",
        RuleCategory::CulturalSensitivity => {
            "Cultural sensitivity: prefer precise, respectful references"
        }
    }
}
