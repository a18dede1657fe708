//! Configuration and dependency initialization for the movies ETL.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::EtlConfig;
