//! `songsmith genres`

use anyhow::{Context, Result};
use serde::Serialize;

use songsmith_core::{Genre, GenreCompatibility, GenreConflict};

use super::print_json;

#[derive(Debug, Serialize)]
struct GenreReport {
    genres: Vec<String>,
    conflicts: Vec<GenreConflict>,
}

pub fn run(names: &[String]) -> Result<()> {
    let genre = Genre::new(names).context("Invalid genre selection")?;
    let conflicts = GenreCompatibility::new().find_conflicts(genre.names());
    print_json(&GenreReport {
        genres: genre.names().to_vec(),
        conflicts,
    })
}
