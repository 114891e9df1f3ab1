//! `songsmith style`

use anyhow::Result;
use serde::Serialize;

use songsmith_core::style::suggestions_for;
use songsmith_core::{StyleDescriptor, StyleIssue, StyleStats};

use super::print_json;

#[derive(Debug, Serialize)]
struct StyleReport {
    input_length: usize,
    issues: Vec<StyleIssue>,
    optimized: String,
    stats: StyleStats,
    suggestions: Vec<String>,
}

fn build_report(descriptor: &str) -> Result<StyleReport> {
    let optimized = StyleDescriptor::optimized(descriptor)?;
    let issues = StyleIssue::detect(descriptor);
    Ok(StyleReport {
        input_length: songsmith_core::char_len(descriptor.trim()),
        suggestions: suggestions_for(&issues),
        issues,
        stats: optimized.stats(),
        optimized: optimized.as_str().to_string(),
    })
}

pub fn run(descriptor: &str) -> Result<()> {
    print_json(&build_report(descriptor)?)
}
