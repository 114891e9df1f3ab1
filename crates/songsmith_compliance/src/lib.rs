//! Songsmith compliance checks
//!
//! Scans prompt text (title, description, style, lyrics, tags) for
//! copyright, trademark, content, commercial, privacy and cultural risks
//! and summarizes them in a scored [`ComplianceReport`].

pub mod config;
pub mod engine;
pub mod report;
pub mod rules;
pub mod types;

pub use config::{ComplianceConfig, ComplianceConfigError, ComplianceConfigUpdate};
pub use engine::ComplianceEngine;
pub use report::ComplianceReport;
pub use rules::{builtin_rules, ComplianceRule, MatcherSpec, RuleMatch, RuleMatcher};
pub use types::{ComplianceInput, ComplianceIssue, ComplianceLevel, RuleCategory};
