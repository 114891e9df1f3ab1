//! Genre selection value object.

use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;

/// Maximum number of genres a prompt may combine.
pub const MAX_GENRES: usize = 5;

/// Canonical genre names accepted by [`Genre`].
pub const GENRE_VOCABULARY: &[&str] = &[
    "Pop",
    "Rock",
    "Jazz",
    "Classical",
    "Electronic",
    "Hip Hop",
    "Country",
    "Blues",
    "Folk",
    "R&B",
    "Soul",
    "Funk",
    "Reggae",
    "Metal",
    "Death Metal",
    "Punk",
    "Ambient",
    "House",
    "Techno",
    "Trap",
    "Dubstep",
    "EDM",
    "Gospel",
    "Lo-Fi",
    "Orchestral",
    "Opera",
    "Bluegrass",
    "Indie",
    "Latin",
    "Disco",
];

/// One to [`MAX_GENRES`] distinct genres from [`GENRE_VOCABULARY`].
///
/// Lookup is case-insensitive; names are stored in canonical casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Genre {
    names: Vec<String>,
}

impl Genre {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, ConstructionError> {
        if names.is_empty() {
            return Err(ConstructionError::NoGenres);
        }
        if names.len() > MAX_GENRES {
            return Err(ConstructionError::TooManyGenres {
                count: names.len(),
                max: MAX_GENRES,
            });
        }

        let mut canonical: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref().trim();
            let known = canonical_name(name)
                .ok_or_else(|| ConstructionError::UnknownGenre(name.to_string()))?;
            if canonical.iter().any(|existing| existing == known) {
                return Err(ConstructionError::DuplicateGenre(known.to_string()));
            }
            canonical.push(known.to_string());
        }

        Ok(Self { names: canonical })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn primary(&self) -> &str {
        &self.names[0]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TryFrom<Vec<String>> for Genre {
    type Error = ConstructionError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(&names)
    }
}

impl From<Genre> for Vec<String> {
    fn from(genre: Genre) -> Self {
        genre.names
    }
}

/// Canonical spelling of a vocabulary genre, if known.
pub fn canonical_name(name: &str) -> Option<&'static str> {
    GENRE_VOCABULARY
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(name.trim()))
}
