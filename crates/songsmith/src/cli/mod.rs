//! Subcommand implementations. Each `run` prints one JSON document.

pub mod check;
pub mod genres;
pub mod optimize;
pub mod style;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use songsmith_pipeline::Prompt;

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Read a prompt from a JSON file.
pub fn load_prompt(path: &Path) -> Result<Prompt> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read prompt file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse prompt file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.json");
        std::fs::write(
            &path,
            concat!(
                r#"{"title":"Night Drive","style":"Synthwave, neon","#,
                r#""genre":["Electronic"],"language":"ja"}"#,
            ),
        )
        .unwrap();
        let prompt = load_prompt(&path).unwrap();
        assert_eq!(prompt.genre_names(), ["Electronic".to_string()]);
        assert_eq!(prompt.language.code(), "ja");
    }

    #[test]
    fn test_load_prompt_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_prompt(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.json"));
    }
}
