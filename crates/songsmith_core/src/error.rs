//! Construction errors for value objects.

use thiserror::Error;

/// Raised when a value object would be built from invalid input.
///
/// Values are never left partially built: constructors either return a
/// complete value or one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("style descriptor is empty")]
    EmptyDescriptor,

    #[error("style descriptor is {length} characters, limit is {max}")]
    LengthExceeded { length: usize, max: usize },

    #[error("at least one genre is required")]
    NoGenres,

    #[error("too many genres: {count} (max {max})")]
    TooManyGenres { count: usize, max: usize },

    #[error("unknown genre: {0}")]
    UnknownGenre(String),

    #[error("duplicate genre: {0}")]
    DuplicateGenre(String),

    #[error("unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("{field} score {value} is outside 0-100")]
    ScoreOutOfRange { field: &'static str, value: u32 },
}
