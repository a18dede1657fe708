//! Processor module for the movies ETL.
//!
//! Transforms joined source rows into search documents.

mod movie_processor;
mod transform;

pub use movie_processor::{MovieProcessor, ProcessedBatch, RowErrorPolicy, SkippedRow};
pub use transform::transform_row;
