//! Rows read from the relational source.

use serde::{Deserialize, Serialize};

/// A writer entry from the writers table.
///
/// `name` is kept exactly as stored, including the unknown marker. Filtering
/// happens when a movie's writers are resolved, not when the lookup is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriterRef {
    pub id: String,
    pub name: String,
}

impl WriterRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single element of a movie's JSON-encoded writers field: `{"id": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriterReference {
    pub id: String,
}

/// One movie as produced by the source join.
///
/// # Fields
///
/// - `id`: Primary key, stable across runs; also the index document id
/// - `genre`: Comma-separated genre names
/// - `director`: Comma-separated director names, or the unknown marker
/// - `title`: Movie title
/// - `plot`: Description text, or the unknown marker
/// - `imdb_rating`: String-encoded decimal, or the unknown marker
/// - `actors_ids` / `actors_names`: Parallel comma-separated lists, `None` when
///   the movie has no actors
/// - `writers`: JSON array of `{"id": ...}` references
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRow {
    pub id: String,
    pub genre: String,
    pub director: String,
    pub title: String,
    pub plot: String,
    pub imdb_rating: String,
    pub actors_ids: Option<String>,
    pub actors_names: Option<String>,
    pub writers: String,
}
