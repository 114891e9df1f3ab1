//! Compliance engine: runs the active rule set over a prompt's text.

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{ComplianceConfig, ComplianceConfigUpdate};
use crate::report::ComplianceReport;
use crate::rules::{builtin_rules, suggestion_for, ComplianceRule};
use crate::types::{ComplianceInput, ComplianceIssue};

/// Rule engine owning its configuration.
///
/// Mutators take `&mut self`; wrap the engine in a lock to share it
/// between tasks.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    builtin: Vec<ComplianceRule>,
    config: ComplianceConfig,
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceEngine {
    /// Engine with built-in rules and default configuration
    pub fn new() -> Self {
        Self::with_config(ComplianceConfig::default())
    }

    pub fn with_config(config: ComplianceConfig) -> Self {
        Self {
            builtin: builtin_rules(),
            config,
        }
    }

    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    pub fn update_config(&mut self, update: ComplianceConfigUpdate) {
        self.config.apply(update);
        info!(
            categories = self.config.enabled_categories.len(),
            strict_mode = self.config.strict_mode,
            custom_rules = self.config.custom_rules.len(),
            "Compliance config updated"
        );
    }

    pub fn add_custom_rule(&mut self, rule: ComplianceRule) {
        info!(rule = %rule.id, category = %rule.category, "Adding custom compliance rule");
        self.config.custom_rules.push(rule);
    }

    /// Remove custom rules whose name matches exactly.
    pub fn remove_custom_rule(&mut self, name: &str) -> bool {
        let before = self.config.custom_rules.len();
        self.config.custom_rules.retain(|rule| rule.name != name);
        let removed = self.config.custom_rules.len() != before;
        if removed {
            info!(rule = name, "Removed custom compliance rule");
        }
        removed
    }

    /// Built-in and custom rules that are enabled and in an enabled category.
    pub fn active_rules(&self) -> impl Iterator<Item = &ComplianceRule> {
        self.builtin
            .iter()
            .chain(self.config.custom_rules.iter())
            .filter(|rule| rule.enabled && self.config.is_category_enabled(rule.category))
    }

    pub fn check(&self, input: &ComplianceInput) -> ComplianceReport {
        let corpus = input.corpus();
        let mut issues = Vec::new();
        let mut rule_count = 0usize;

        for rule in self.active_rules() {
            rule_count += 1;
            for found in rule.matcher.find_matches(&corpus) {
                issues.push(ComplianceIssue {
                    id: Uuid::new_v4(),
                    rule_id: rule.id.clone(),
                    category: rule.category,
                    level: rule.severity,
                    title: rule.name.clone(),
                    description: if rule.description.is_empty() {
                        format!("Matched \"{}\"", found.matched)
                    } else {
                        format!("{} (matched \"{}\")", rule.description, found.matched)
                    },
                    suggestion: suggestion_for(rule.category).to_string(),
                    affected_text: found.excerpt,
                });
            }
        }

        let report = ComplianceReport::from_issues(issues, self.config.strict_mode);
        debug!(
            rules = rule_count,
            issues = report.issues.len(),
            level = %report.overall_level,
            score = report.score,
            "Compliance check complete"
        );
        report
    }

    /// Check each input independently, preserving order.
    pub fn check_batch(&self, inputs: &[ComplianceInput]) -> Vec<ComplianceReport> {
        inputs.iter().map(|input| self.check(input)).collect()
    }
}
