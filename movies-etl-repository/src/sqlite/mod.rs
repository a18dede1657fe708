//! SQLite implementation of the movie source.

mod source;

pub use source::SqliteMovieSource;
