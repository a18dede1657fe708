//! SQLite-backed movie source.
//!
//! Reads the normalized `movies`, `actors`, `movie_actors` and `writers` tables.
//! Actor ids and names are aggregated per movie inside the query so that each
//! movie arrives as a single row.

use async_trait::async_trait;
use movies_etl_shared::{SourceRow, WriterRef};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::debug;

use crate::errors::SourceError;
use crate::interfaces::MovieSource;

const WRITERS_QUERY: &str = "SELECT DISTINCT id, name FROM writers";

// Both group_concat calls walk the same joined rows, so the two lists come out
// position-aligned. Movies stored with a single `writer` column get a one-element
// writers array synthesized here.
const MOVIES_QUERY: &str = r#"
WITH x AS (
    SELECT m.id,
           group_concat(a.id) AS actors_ids,
           group_concat(a.name) AS actors_names
    FROM movies m
        LEFT JOIN movie_actors ma ON m.id = ma.movie_id
        LEFT JOIN actors a ON ma.actor_id = a.id
    GROUP BY m.id
)
SELECT m.id,
       m.genre,
       m.director,
       m.title,
       m.plot,
       CAST(m.imdb_rating AS TEXT) AS imdb_rating,
       x.actors_ids,
       x.actors_names,
       CASE
           WHEN m.writers IS NULL OR m.writers = '' THEN '[{"id": "' || m.writer || '"}]'
           ELSE m.writers
       END AS writers
FROM movies m
LEFT JOIN x ON m.id = x.id
ORDER BY m.id
"#;

/// SQLite-backed movie source.
pub struct SqliteMovieSource {
    /// SQLite connection pool
    pool: SqlitePool,
}

impl SqliteMovieSource {
    /// Creates a source over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to the database at `url` (e.g. `sqlite://db.sqlite`).
    pub async fn connect(url: &str) -> Result<Self, SourceError> {
        let pool = SqlitePool::connect(url).await?;
        Ok(Self { pool })
    }

    fn movie_from_row(row: &SqliteRow) -> Result<SourceRow, SourceError> {
        let writers: Option<String> = row.try_get("writers")?;
        let id: String = row.try_get("id")?;

        // NULL here means neither `writers` nor `writer` was filled in.
        let writers = writers.ok_or_else(|| {
            SourceError::malformed_row(format!("movie {} has no writers reference", id))
        })?;

        Ok(SourceRow {
            genre: row.try_get("genre")?,
            director: row.try_get("director")?,
            title: row.try_get("title")?,
            plot: row.try_get("plot")?,
            imdb_rating: row.try_get("imdb_rating")?,
            actors_ids: row.try_get("actors_ids")?,
            actors_names: row.try_get("actors_names")?,
            writers,
            id,
        })
    }
}

#[async_trait]
impl MovieSource for SqliteMovieSource {
    async fn load_writers(&self) -> Result<Vec<WriterRef>, SourceError> {
        let rows = sqlx::query(WRITERS_QUERY).fetch_all(&self.pool).await?;

        let writers = rows
            .iter()
            .map(|row| -> Result<WriterRef, SourceError> {
                Ok(WriterRef::new(
                    row.try_get::<String, _>("id")?,
                    row.try_get::<String, _>("name")?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = writers.len(), "Loaded writers");
        Ok(writers)
    }

    async fn load_movie_rows(&self) -> Result<Vec<SourceRow>, SourceError> {
        let rows = sqlx::query(MOVIES_QUERY).fetch_all(&self.pool).await?;

        let movies = rows
            .iter()
            .map(Self::movie_from_row)
            .collect::<Result<Vec<_>, SourceError>>()?;

        debug!(count = movies.len(), "Loaded movie rows");
        Ok(movies)
    }
}
