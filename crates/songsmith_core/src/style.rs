//! Style descriptors
//!
//! A style descriptor is the short tag string handed to the generation
//! service, e.g. `"Indie Rock, jangly guitar, wistful, female vocals"`. The
//! service truncates anything past [`MAX_STYLE_LENGTH`] characters, so the
//! descriptor must carry as much musical information as possible inside that
//! budget.
//!
//! # Budget fitting
//!
//! [`StyleDescriptor::optimized`] fits arbitrary text into the budget:
//!
//! 1. Text already within budget is kept as-is
//! 2. Exact duplicate elements are dropped
//! 3. Elements are regrouped genre, mood, instrument, other
//! 4. Elements are accepted greedily until the next one would overflow
//! 5. If not even the first element fits, it is hard-truncated
//!
//! Every step only runs if the previous one left the text over budget, and
//! the result is never empty for non-empty input.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::char_len;
use crate::error::ConstructionError;

/// Hard character budget of a style descriptor.
pub const MAX_STYLE_LENGTH: usize = 120;

/// Recommended element count range (inclusive).
const MIN_RECOMMENDED_ELEMENTS: usize = 2;
const MAX_RECOMMENDED_ELEMENTS: usize = 8;

const ALREADY_OPTIMIZED: &str = "Style descriptor is already well optimized";

const ELEMENT_SEPARATOR: &str = ", ";

const GENRE_KEYWORDS: &[&str] = &[
    "rock",
    "pop",
    "jazz",
    "classical",
    "electronic",
    "hip hop",
    "hip-hop",
    "rap",
    "trap",
    "country",
    "blues",
    "folk",
    "metal",
    "punk",
    "r&b",
    "soul",
    "funk",
    "reggae",
    "edm",
    "house",
    "techno",
    "trance",
    "dubstep",
    "drum and bass",
    "dnb",
    "ambient",
    "indie",
    "gospel",
    "latin",
    "disco",
    "lo-fi",
    "lofi",
    "orchestral",
    "opera",
    "bluegrass",
    "grunge",
    "k-pop",
    "j-pop",
    "synthwave",
    "shoegaze",
];

const INSTRUMENT_KEYWORDS: &[&str] = &[
    "guitar",
    "piano",
    "drums",
    "drum",
    "bass",
    "synth",
    "violin",
    "cello",
    "strings",
    "saxophone",
    "sax",
    "trumpet",
    "brass",
    "flute",
    "organ",
    "harp",
    "ukulele",
    "banjo",
    "mandolin",
    "accordion",
    "808",
    "percussion",
    "choir",
    "vocals",
    "horns",
];

const MOOD_KEYWORDS: &[&str] = &[
    "energetic",
    "upbeat",
    "calm",
    "happy",
    "sad",
    "melancholic",
    "melancholy",
    "uplifting",
    "dark",
    "dreamy",
    "powerful",
    "romantic",
    "chill",
    "aggressive",
    "peaceful",
    "nostalgic",
    "epic",
    "mellow",
    "haunting",
    "playful",
    "intense",
    "emotional",
    "wistful",
    "groovy",
    "soft",
];

// ============================================================================
// Classification
// ============================================================================

/// Bucket a style element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleCategory {
    Genre,
    Instrument,
    Mood,
    Other,
}

impl StyleCategory {
    /// Matching priority: the first category whose keywords match wins.
    pub const MATCH_PRIORITY: [StyleCategory; 3] = [
        StyleCategory::Genre,
        StyleCategory::Instrument,
        StyleCategory::Mood,
    ];

    /// Order used when a descriptor has to be regrouped to fit the budget.
    pub const OPTIMIZATION_ORDER: [StyleCategory; 4] = [
        StyleCategory::Genre,
        StyleCategory::Mood,
        StyleCategory::Instrument,
        StyleCategory::Other,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            StyleCategory::Genre => GENRE_KEYWORDS,
            StyleCategory::Instrument => INSTRUMENT_KEYWORDS,
            StyleCategory::Mood => MOOD_KEYWORDS,
            StyleCategory::Other => &[],
        }
    }

    /// Classify a single element (case-insensitive exact or substring match).
    pub fn of(element: &str) -> Self {
        let lower = element.to_lowercase();
        Self::MATCH_PRIORITY
            .into_iter()
            .find(|category| category.keywords().iter().any(|kw| lower.contains(kw)))
            .unwrap_or(StyleCategory::Other)
    }
}

impl fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StyleCategory::Genre => "genre",
            StyleCategory::Instrument => "instrument",
            StyleCategory::Mood => "mood",
            StyleCategory::Other => "other",
        };
        write!(f, "{}", label)
    }
}

/// Elements grouped by category, each bucket in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleClassification {
    pub genres: Vec<String>,
    pub instruments: Vec<String>,
    pub moods: Vec<String>,
    pub other: Vec<String>,
}

impl StyleClassification {
    pub fn from_elements(elements: &[String]) -> Self {
        let mut classification = Self::default();
        for element in elements {
            let bucket = match StyleCategory::of(element) {
                StyleCategory::Genre => &mut classification.genres,
                StyleCategory::Instrument => &mut classification.instruments,
                StyleCategory::Mood => &mut classification.moods,
                StyleCategory::Other => &mut classification.other,
            };
            bucket.push(element.clone());
        }
        classification
    }

    pub fn bucket(&self, category: StyleCategory) -> &[String] {
        match category {
            StyleCategory::Genre => &self.genres,
            StyleCategory::Instrument => &self.instruments,
            StyleCategory::Mood => &self.moods,
            StyleCategory::Other => &self.other,
        }
    }

    /// Concatenate buckets in `order`. Categories missing from `order` are dropped.
    pub fn prioritized(&self, order: &[StyleCategory]) -> Vec<String> {
        order
            .iter()
            .flat_map(|category| self.bucket(*category).iter().cloned())
            .collect()
    }
}

// ============================================================================
// Stats and diagnostics
// ============================================================================

/// Summary numbers for a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleStats {
    pub length: usize,
    pub element_count: usize,
    pub average_element_length: usize,
    pub genre_count: usize,
    pub instrument_count: usize,
    pub mood_count: usize,
}

/// A problem found in a style text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleIssue {
    ExceedsLimit { length: usize, max: usize },
    TooFewElements { count: usize },
    TooManyElements { count: usize },
    DuplicateElements { duplicates: Vec<String> },
    NoGenre,
}

impl StyleIssue {
    pub fn message(&self) -> String {
        match self {
            StyleIssue::ExceedsLimit { length, max } => {
                format!("Style is {} characters, over the {} character limit", length, max)
            }
            StyleIssue::TooFewElements { count } => {
                format!(
                    "Only {} style element(s); at least {} work best",
                    count, MIN_RECOMMENDED_ELEMENTS
                )
            }
            StyleIssue::TooManyElements { count } => {
                format!(
                    "{} style elements; more than {} dilutes the style",
                    count, MAX_RECOMMENDED_ELEMENTS
                )
            }
            StyleIssue::DuplicateElements { duplicates } => {
                format!("Duplicate elements: {}", duplicates.join(", "))
            }
            StyleIssue::NoGenre => "No recognised genre in the style".to_string(),
        }
    }

    pub fn suggestion(&self) -> String {
        match self {
            StyleIssue::ExceedsLimit { .. } => {
                "Shorten the style: drop filler words and keep genre and mood first".to_string()
            }
            StyleIssue::TooFewElements { .. } => {
                "Add a mood or a lead instrument to give the style more direction".to_string()
            }
            StyleIssue::TooManyElements { .. } => {
                "Keep the strongest elements and remove the rest".to_string()
            }
            StyleIssue::DuplicateElements { .. } => "Remove repeated elements".to_string(),
            StyleIssue::NoGenre => "Start the style with a clear genre".to_string(),
        }
    }

    /// Detect issues in raw style text, which may be over budget.
    pub fn detect(text: &str) -> Vec<StyleIssue> {
        let mut issues = Vec::new();
        let length = char_len(text.trim());
        if length > MAX_STYLE_LENGTH {
            issues.push(StyleIssue::ExceedsLimit {
                length,
                max: MAX_STYLE_LENGTH,
            });
        }

        let elements = split_elements(text);
        if elements.len() < MIN_RECOMMENDED_ELEMENTS {
            issues.push(StyleIssue::TooFewElements {
                count: elements.len(),
            });
        } else if elements.len() > MAX_RECOMMENDED_ELEMENTS {
            issues.push(StyleIssue::TooManyElements {
                count: elements.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut duplicates: Vec<String> = Vec::new();
        for element in &elements {
            if !seen.insert(element.as_str()) && !duplicates.contains(element) {
                duplicates.push(element.clone());
            }
        }
        if !duplicates.is_empty() {
            issues.push(StyleIssue::DuplicateElements { duplicates });
        }

        if !elements.iter().any(|e| StyleCategory::of(e) == StyleCategory::Genre) {
            issues.push(StyleIssue::NoGenre);
        }

        issues
    }
}

// ============================================================================
// Style Descriptor
// ============================================================================

/// Trimmed, non-empty style text of at most [`MAX_STYLE_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StyleDescriptor {
    value: String,
}

impl StyleDescriptor {
    /// Build a descriptor, rejecting empty or over-budget text.
    pub fn new(raw: &str) -> Result<Self, ConstructionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConstructionError::EmptyDescriptor);
        }
        let length = char_len(trimmed);
        if length > MAX_STYLE_LENGTH {
            return Err(ConstructionError::LengthExceeded {
                length,
                max: MAX_STYLE_LENGTH,
            });
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Fit arbitrary text into the budget. Fails only on empty input.
    pub fn optimized(raw: &str) -> Result<Self, ConstructionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConstructionError::EmptyDescriptor);
        }
        let value = fit_to_budget(trimmed, MAX_STYLE_LENGTH);
        if value.len() != trimmed.len() {
            debug!(
                before = char_len(trimmed),
                after = char_len(&value),
                "Style descriptor fitted to budget"
            );
        }
        Ok(Self { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        char_len(&self.value)
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn elements(&self) -> Vec<String> {
        split_elements(&self.value)
    }

    pub fn classify(&self) -> StyleClassification {
        StyleClassification::from_elements(&self.elements())
    }

    /// Drop exact (case-sensitive) duplicate elements, keeping the first.
    ///
    /// Unchanged text is returned as-is. When elements are removed the rest
    /// are re-joined with `", "`; should that re-join overflow the budget the
    /// trailing elements that no longer fit are dropped.
    pub fn deduplicate(&self) -> Self {
        let elements = self.elements();
        let unique = dedupe_elements(&elements);
        if unique.len() == elements.len() {
            return self.clone();
        }
        Self {
            value: fit_to_budget(&unique.join(ELEMENT_SEPARATOR), MAX_STYLE_LENGTH),
        }
    }

    /// Regroup elements by category order. The result may exceed the budget.
    pub fn prioritize(&self, order: &[StyleCategory]) -> String {
        self.classify().prioritized(order).join(ELEMENT_SEPARATOR)
    }

    /// A constructed descriptor is already within budget, so this returns an
    /// equal descriptor; see [`StyleDescriptor::optimized`] for raw text.
    pub fn optimize(&self) -> Self {
        Self {
            value: fit_to_budget(&self.value, MAX_STYLE_LENGTH),
        }
    }

    pub fn stats(&self) -> StyleStats {
        let elements = self.elements();
        let classification = StyleClassification::from_elements(&elements);
        let average_element_length = if elements.is_empty() {
            0
        } else {
            let total: usize = elements.iter().map(|e| char_len(e)).sum();
            (total as f64 / elements.len() as f64).round() as usize
        };
        StyleStats {
            length: self.len(),
            element_count: elements.len(),
            average_element_length,
            genre_count: classification.genres.len(),
            instrument_count: classification.instruments.len(),
            mood_count: classification.moods.len(),
        }
    }

    pub fn is_within_limit(&self) -> bool {
        self.len() <= MAX_STYLE_LENGTH
    }

    pub fn is_recommended_complexity(&self) -> bool {
        let count = self.elements().len();
        (MIN_RECOMMENDED_ELEMENTS..=MAX_RECOMMENDED_ELEMENTS).contains(&count)
    }

    pub fn validation_issues(&self) -> Vec<StyleIssue> {
        StyleIssue::detect(&self.value)
    }

    /// One suggestion per issue, or a single "already optimized" line.
    pub fn optimization_suggestions(&self) -> Vec<String> {
        suggestions_for(&self.validation_issues())
    }
}

impl fmt::Display for StyleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for StyleDescriptor {
    type Error = ConstructionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<StyleDescriptor> for String {
    fn from(descriptor: StyleDescriptor) -> Self {
        descriptor.value
    }
}

/// Suggestions for a set of issues; never empty.
pub fn suggestions_for(issues: &[StyleIssue]) -> Vec<String> {
    if issues.is_empty() {
        return vec![ALREADY_OPTIMIZED.to_string()];
    }
    issues.iter().map(StyleIssue::suggestion).collect()
}

/// Comma-split, trim, drop empties, preserve order.
pub fn split_elements(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

fn dedupe_elements(elements: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    elements
        .iter()
        .filter(|e| seen.insert(e.as_str()))
        .cloned()
        .collect()
}

/// Budget-fitting core shared by both entry points. `trimmed` must be
/// non-empty and trimmed; the result then is too.
fn fit_to_budget(trimmed: &str, budget: usize) -> String {
    if char_len(trimmed) <= budget {
        return trimmed.to_string();
    }

    let elements = split_elements(trimmed);
    if elements.is_empty() {
        // Nothing but separators: cut the raw text.
        return truncate_chars(trimmed, budget);
    }

    let unique = dedupe_elements(&elements);
    let joined = unique.join(ELEMENT_SEPARATOR);
    if char_len(&joined) <= budget {
        return joined;
    }

    let prioritized =
        StyleClassification::from_elements(&unique).prioritized(&StyleCategory::OPTIMIZATION_ORDER);
    let joined = prioritized.join(ELEMENT_SEPARATOR);
    if char_len(&joined) <= budget {
        return joined;
    }

    let mut accepted = String::new();
    let mut accepted_len = 0;
    for element in &prioritized {
        let element_len = char_len(element);
        let next_len = if accepted.is_empty() {
            element_len
        } else {
            accepted_len + ELEMENT_SEPARATOR.len() + element_len
        };
        if next_len > budget {
            break;
        }
        if !accepted.is_empty() {
            accepted.push_str(ELEMENT_SEPARATOR);
        }
        accepted.push_str(element);
        accepted_len = next_len;
    }

    if accepted.is_empty() {
        return truncate_chars(&prioritized[0], budget);
    }
    accepted
}

fn truncate_chars(text: &str, max: usize) -> String {
    let cut: String = text.chars().take(max).collect();
    cut.trim_end().to_string()
}
