//! Movie document types for the search index.
//!
//! This module defines the document structure that is indexed in the search engine.
//! The field names are the contract with the search API reading the same index.

use serde::{Deserialize, Serialize};

/// A person attached to a movie (actor or writer), denormalized into the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub name: String,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Document representation for the search index.
///
/// Unknown values are serialized as explicit `null`, never omitted, so every
/// document carries the full field set.
///
/// # Invariants
///
/// - `actors` and `actors_names` have the same length and are index-aligned
/// - `writers` holds no duplicate ids; `writers_names` is aligned with it
/// - `genre` and `director` are lists, never delimited strings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDocument {
    pub id: String,
    pub title: String,
    pub imdb_rating: Option<f64>,
    pub description: Option<String>,
    pub genre: Vec<String>,
    pub actors: Vec<Person>,
    pub actors_names: Vec<String>,
    pub writers: Vec<Person>,
    pub writers_names: Vec<String>,
    pub director: Option<Vec<String>>,
}

impl MovieDocument {
    /// The document ID used in the search index.
    ///
    /// This is the movie's primary key, so indexing the same movie twice
    /// overwrites the previous document.
    pub fn document_id(&self) -> &str {
        &self.id
    }
}
