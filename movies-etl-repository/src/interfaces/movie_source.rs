use async_trait::async_trait;
use movies_etl_shared::{SourceRow, WriterRef};

use crate::errors::SourceError;

/// Read access to the relational movie database.
///
/// Both reads are full scans; the ETL reloads the whole collection on every run.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Read every writer as an `(id, name)` pair.
    async fn load_writers(&self) -> Result<Vec<WriterRef>, SourceError>;

    /// Read one joined row per movie.
    ///
    /// Actor ids and names must arrive as parallel, position-aligned,
    /// comma-delimited strings, or both be absent.
    async fn load_movie_rows(&self) -> Result<Vec<SourceRow>, SourceError>;
}
