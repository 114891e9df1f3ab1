//! Genre compatibility
//!
//! Some genre combinations pull a generation in opposite directions and
//! usually produce muddy results. The table below lists, per genre, the
//! genres it clashes with plus a reason and a remediation.
//!
//! A pair conflicts if either side's entry names the other. Only the first
//! matching entry produces output, so each pair is reported at most once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly two genres clash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConflictSeverity::Low => "low",
            ConflictSeverity::Medium => "medium",
            ConflictSeverity::High => "high",
        };
        write!(f, "{}", label)
    }
}

/// A detected clash between two genres of the same prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreConflict {
    pub genres: (String, String),
    pub severity: ConflictSeverity,
    pub reason: String,
    pub suggestion: String,
}

struct ConflictRule {
    genre: &'static str,
    conflicts_with: &'static [&'static str],
    severity: ConflictSeverity,
    reason: &'static str,
    suggestion: &'static str,
}

const CONFLICT_RULES: &[ConflictRule] = &[
    ConflictRule {
        genre: "Classical",
        conflicts_with: &["Death Metal", "Dubstep", "Trap"],
        severity: ConflictSeverity::High,
        reason: "Orchestral dynamics and heavy distortion or sub-bass fight for the same space",
        suggestion: "Pick one as the base and describe the other as a texture, \
                     e.g. 'symphonic strings'",
    },
    ConflictRule {
        genre: "Death Metal",
        conflicts_with: &["Lo-Fi", "Ambient", "Gospel"],
        severity: ConflictSeverity::High,
        reason: "Extreme aggression cancels the relaxed or devotional character",
        suggestion: "Use 'Metal' or 'Post-Rock' style wording for a softer heavy sound",
    },
    ConflictRule {
        genre: "Opera",
        conflicts_with: &["Trap", "Dubstep", "Punk"],
        severity: ConflictSeverity::Medium,
        reason: "Operatic vocals rarely sit well over sparse 808 or drop-driven arrangements",
        suggestion: "Keep the operatic vocal and choose an orchestral or cinematic backing",
    },
    ConflictRule {
        genre: "Country",
        conflicts_with: &["Dubstep", "Techno"],
        severity: ConflictSeverity::Medium,
        reason: "Acoustic storytelling gets buried under synthetic club production",
        suggestion: "Try 'Country Pop' wording or keep electronics to light beats",
    },
    ConflictRule {
        genre: "Ambient",
        conflicts_with: &["Punk", "Metal"],
        severity: ConflictSeverity::Medium,
        reason: "Slow evolving textures clash with fast, loud arrangements",
        suggestion: "Use ambient elements only as an intro or outro section",
    },
    ConflictRule {
        genre: "Jazz",
        conflicts_with: &["Death Metal", "Dubstep"],
        severity: ConflictSeverity::Medium,
        reason: "Swing feel and complex harmony collapse under rigid heavy rhythms",
        suggestion: "Describe a jazz-fusion or nu-jazz sound instead",
    },
    ConflictRule {
        genre: "Bluegrass",
        conflicts_with: &["EDM", "Dubstep", "Techno"],
        severity: ConflictSeverity::Low,
        reason: "Fast acoustic picking is hard to keep audible against four-on-the-floor",
        suggestion: "Name the acoustic instruments explicitly to keep them in front",
    },
    ConflictRule {
        genre: "Lo-Fi",
        conflicts_with: &["Metal", "EDM"],
        severity: ConflictSeverity::Low,
        reason: "Dusty, low-energy production undercuts a high-energy genre",
        suggestion: "Choose whether the track should relax or energize",
    },
    ConflictRule {
        genre: "Gospel",
        conflicts_with: &["Trap"],
        severity: ConflictSeverity::Low,
        reason: "Choir-led arrangements and minimal trap beats can sound disjointed",
        suggestion: "Describe a 'gospel choir over modern beat' to guide the blend",
    },
];

/// Static genre conflict table lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenreCompatibility;

impl GenreCompatibility {
    pub fn new() -> Self {
        Self
    }

    /// One conflict per clashing pair, in pair order `(i, j)` with `i < j`.
    pub fn find_conflicts<S: AsRef<str>>(&self, genres: &[S]) -> Vec<GenreConflict> {
        let mut conflicts = Vec::new();
        for (i, first) in genres.iter().enumerate() {
            for second in &genres[i + 1..] {
                let (a, b) = (first.as_ref(), second.as_ref());
                if let Some(rule) = find_rule(a, b) {
                    conflicts.push(GenreConflict {
                        genres: (a.to_string(), b.to_string()),
                        severity: rule.severity,
                        reason: rule.reason.to_string(),
                        suggestion: rule.suggestion.to_string(),
                    });
                }
            }
        }
        conflicts
    }

    pub fn has_conflicts<S: AsRef<str>>(&self, genres: &[S]) -> bool {
        !self.find_conflicts(genres).is_empty()
    }
}

fn find_rule(a: &str, b: &str) -> Option<&'static ConflictRule> {
    CONFLICT_RULES
        .iter()
        .find(|rule| rule_names(rule, a, b) || rule_names(rule, b, a))
}

fn rule_names(rule: &ConflictRule, genre: &str, other: &str) -> bool {
    rule.genre.eq_ignore_ascii_case(genre.trim())
        && rule
            .conflicts_with
            .iter()
            .any(|c| c.eq_ignore_ascii_case(other.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classical_death_metal_single_high() {
        // Both directions are in the table; only one conflict is emitted.
        let conflicts = GenreCompatibility::new().find_conflicts(&["Classical", "Death Metal"]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].severity, ConflictSeverity::High);
        assert_eq!(
            conflicts[0].genres,
            ("Classical".to_string(), "Death Metal".to_string())
        );
    }

    #[test]
    fn test_symmetric_lookup() {
        let compat = GenreCompatibility::new();
        let forward = compat.find_conflicts(&["Country", "Dubstep"]);
        let backward = compat.find_conflicts(&["dubstep", "country"]);
        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert_eq!(forward[0].severity, backward[0].severity);
    }

    #[test]
    fn test_no_conflicts() {
        let compat = GenreCompatibility::new();
        assert!(compat.find_conflicts(&["Pop"]).is_empty());
        assert!(!compat.has_conflicts(&["Pop", "Rock", "Funk"]));
    }

    #[test]
    fn test_multiple_pairs() {
        let conflicts =
            GenreCompatibility::new().find_conflicts(&["Classical", "Trap", "Gospel", "Pop"]);
        // Classical+Trap (high), Trap+Gospel (low)
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].severity, ConflictSeverity::High);
        assert_eq!(conflicts[1].severity, ConflictSeverity::Low);
    }
}
