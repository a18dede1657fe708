//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch as the backend.

pub mod bulk;
pub mod index_config;
mod provider;

pub use provider::OpenSearchProvider;
