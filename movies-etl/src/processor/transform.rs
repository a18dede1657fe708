//! Row transformation.
//!
//! Turns one joined source row into one search document. This is where the
//! source's "N/A" convention is converted into `None`; nothing downstream
//! compares against the marker.

use std::collections::HashSet;

use movies_etl_shared::{known, MovieDocument, Person, SourceRow, WriterReference};

use crate::directory::WriterDirectory;
use crate::errors::TransformError;

/// Transform a single source row into a movie document.
///
/// Pure: the result depends only on `row` and `writers`.
///
/// # Errors
///
/// * `MalformedRating` - rating is neither numeric nor the unknown marker
/// * `MalformedWriterList` - writers field is not a JSON list of `{"id": ...}`
/// * `UnresolvedWriterReference` - a referenced writer id is not in `writers`
/// * `MalformedActorList` - actor id and name lists have different lengths
pub fn transform_row(
    row: &SourceRow,
    writers: &WriterDirectory,
) -> Result<MovieDocument, TransformError> {
    let movie_writers = resolve_writers(row, writers)?;
    let actors = pair_actors(row)?;

    Ok(MovieDocument {
        id: row.id.clone(),
        title: row.title.clone(),
        imdb_rating: parse_rating(row)?,
        description: known(&row.plot).map(str::to_string),
        genre: split_genre(&row.genre),
        actors_names: actors.iter().map(|a| a.name.clone()).collect(),
        actors,
        writers_names: movie_writers.iter().map(|w| w.name.clone()).collect(),
        writers: movie_writers,
        director: known(&row.director).map(split_directors),
    })
}

// Genres are stored as "Action, Adventure"; all spaces are dropped.
fn split_genre(raw: &str) -> Vec<String> {
    raw.replace(' ', "").split(',').map(str::to_string).collect()
}

fn split_directors(raw: &str) -> Vec<String> {
    raw.split(',').map(|name| name.trim().to_string()).collect()
}

fn parse_rating(row: &SourceRow) -> Result<Option<f64>, TransformError> {
    let Some(raw) = known(&row.imdb_rating) else {
        return Ok(None);
    };

    let malformed = || TransformError::MalformedRating {
        id: row.id.clone(),
        value: raw.to_string(),
    };

    // NaN and infinities parse as f64 but have no JSON representation.
    match raw.trim().parse::<f64>() {
        Ok(rating) if rating.is_finite() => Ok(Some(rating)),
        _ => Err(malformed()),
    }
}

fn resolve_writers(
    row: &SourceRow,
    directory: &WriterDirectory,
) -> Result<Vec<Person>, TransformError> {
    let references: Vec<WriterReference> =
        serde_json::from_str(&row.writers).map_err(|e| TransformError::MalformedWriterList {
            id: row.id.clone(),
            reason: e.to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for reference in references {
        let writer = directory.get(&reference.id).ok_or_else(|| {
            TransformError::UnresolvedWriterReference {
                id: row.id.clone(),
                writer_id: reference.id.clone(),
            }
        })?;

        let Some(name) = known(&writer.name) else {
            continue;
        };

        if seen.insert(writer.id.clone()) {
            resolved.push(Person::new(writer.id.clone(), name));
        }
    }

    Ok(resolved)
}

fn pair_actors(row: &SourceRow) -> Result<Vec<Person>, TransformError> {
    let (Some(ids), Some(names)) = (&row.actors_ids, &row.actors_names) else {
        return Ok(Vec::new());
    };

    let ids: Vec<&str> = ids.split(',').collect();
    let names: Vec<&str> = names.split(',').collect();

    if ids.len() != names.len() {
        return Err(TransformError::MalformedActorList {
            id: row.id.clone(),
            ids: ids.len(),
            names: names.len(),
        });
    }

    Ok(ids
        .into_iter()
        .zip(names)
        .filter_map(|(id, name)| known(name).map(|name| Person::new(id, name)))
        .collect())
}
