//! Integration tests for the movies ETL pipeline.
//!
//! These tests use the real Pipeline but mock dependencies
//! (MovieSource and SearchIndexProvider) to ensure reliable testing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use movies_etl::errors::{IngestError, TransformError};
use movies_etl::loader::{BulkLoader, LoaderConfig};
use movies_etl::orchestrator::{Pipeline, PipelineConfig};
use movies_etl::processor::{MovieProcessor, RowErrorPolicy};
use movies_etl_repository::{
    BulkIndexSummary, BulkItemOutcome, MovieSource, SearchIndexError, SearchIndexProvider,
    SourceError,
};
use movies_etl_shared::{MovieDocument, Person, SourceRow, WriterRef};

// Mock source for testing
struct MockSource {
    writers: Vec<WriterRef>,
    rows: Vec<SourceRow>,
    unavailable: bool,
}

impl MockSource {
    fn new(writers: Vec<WriterRef>, rows: Vec<SourceRow>) -> Self {
        Self {
            writers,
            rows,
            unavailable: false,
        }
    }

    fn unavailable() -> Self {
        Self {
            writers: Vec::new(),
            rows: Vec::new(),
            unavailable: true,
        }
    }
}

#[async_trait::async_trait]
impl MovieSource for MockSource {
    async fn load_writers(&self) -> Result<Vec<WriterRef>, SourceError> {
        if self.unavailable {
            return Err(SourceError::malformed_row("no such table: writers"));
        }
        Ok(self.writers.clone())
    }

    async fn load_movie_rows(&self) -> Result<Vec<SourceRow>, SourceError> {
        if self.unavailable {
            return Err(SourceError::malformed_row("no such table: movies"));
        }
        Ok(self.rows.clone())
    }
}

// In-memory index keyed by (index, id), so writes behave as upserts.
struct MockIndex {
    documents: Mutex<HashMap<(String, String), MovieDocument>>,
    created: Mutex<HashSet<String>>,
    reject: HashSet<String>,
    requests: Mutex<usize>,
    down: bool,
}

impl MockIndex {
    fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            created: Mutex::new(HashSet::new()),
            reject: HashSet::new(),
            requests: Mutex::new(0),
            down: false,
        }
    }

    fn rejecting(ids: &[&str]) -> Self {
        Self {
            reject: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::new()
        }
    }

    fn down() -> Self {
        Self {
            down: true,
            ..Self::new()
        }
    }

    fn get(&self, index: &str, id: &str) -> Option<MovieDocument> {
        self.documents
            .lock()
            .unwrap()
            .get(&(index.to_string(), id.to_string()))
            .cloned()
    }

    fn count(&self, index: &str) -> usize {
        self.documents
            .lock()
            .unwrap()
            .keys()
            .filter(|(i, _)| i == index)
            .count()
    }

    fn request_count(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl SearchIndexProvider for MockIndex {
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchIndexError> {
        self.created.lock().unwrap().insert(index.to_string());
        Ok(())
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: &[MovieDocument],
    ) -> Result<BulkIndexSummary, SearchIndexError> {
        *self.requests.lock().unwrap() += 1;
        if self.down {
            return Err(SearchIndexError::transport("connection refused"));
        }

        let mut stored = self.documents.lock().unwrap();
        let items = documents
            .iter()
            .map(|doc| {
                if self.reject.contains(&doc.id) {
                    BulkItemOutcome::rejected(&doc.id, "mapper_parsing_exception: failed to parse")
                } else {
                    stored.insert((index.to_string(), doc.id.clone()), doc.clone());
                    BulkItemOutcome::indexed(&doc.id)
                }
            })
            .collect();

        Ok(BulkIndexSummary::new(items))
    }
}

fn row(id: &str) -> SourceRow {
    SourceRow {
        id: id.to_string(),
        genre: "Drama".to_string(),
        director: "Some Director".to_string(),
        title: format!("Movie {}", id),
        plot: "A plot".to_string(),
        imdb_rating: "6.0".to_string(),
        actors_ids: None,
        actors_names: None,
        writers: "[]".to_string(),
    }
}

fn scenario_row() -> SourceRow {
    SourceRow {
        id: "tt1".to_string(),
        genre: "Action, Drama".to_string(),
        director: "N/A".to_string(),
        title: "Scenario".to_string(),
        plot: "N/A".to_string(),
        imdb_rating: "8.5".to_string(),
        actors_ids: Some("a1,a2".to_string()),
        actors_names: Some("Alice,N/A".to_string()),
        writers: r#"[{"id":"w1"}]"#.to_string(),
    }
}

fn pipeline(source: MockSource, index: Arc<MockIndex>) -> Pipeline {
    Pipeline::new(Arc::new(source), MovieProcessor::new(), BulkLoader::new(index))
}

#[tokio::test]
async fn test_scenario_row_is_indexed() {
    let index = Arc::new(MockIndex::new());
    let source = MockSource::new(vec![WriterRef::new("w1", "Jane Doe")], vec![scenario_row()]);

    let report = pipeline(source, index.clone()).run("movies").await.unwrap();

    assert_eq!(report.rows_read, 1);
    assert!(report.skipped.is_empty());
    assert_eq!(report.load.succeeded, 1);
    assert!(index.created.lock().unwrap().contains("movies"));

    let doc = index.get("movies", "tt1").unwrap();
    assert_eq!(doc.genre, vec!["Action", "Drama"]);
    assert_eq!(doc.director, None);
    assert_eq!(doc.description, None);
    assert_eq!(doc.imdb_rating, Some(8.5));
    assert_eq!(doc.writers, vec![Person::new("w1", "Jane Doe")]);
    assert_eq!(doc.writers_names, vec!["Jane Doe"]);
    assert_eq!(doc.actors, vec![Person::new("a1", "Alice")]);
    assert_eq!(doc.actors_names, vec!["Alice"]);
}

#[tokio::test]
async fn test_writer_listed_after_movie_is_resolved() {
    // The directory is complete before any row is transformed.
    let index = Arc::new(MockIndex::new());
    let mut movie = row("tt1");
    movie.writers = r#"[{"id":"w_last"}]"#.to_string();
    let writers = vec![
        WriterRef::new("w1", "First"),
        WriterRef::new("w2", "Second"),
        WriterRef::new("w_last", "Last Writer"),
    ];

    let report = pipeline(MockSource::new(writers, vec![movie]), index.clone())
        .run("movies")
        .await
        .unwrap();

    assert!(report.skipped.is_empty());
    assert_eq!(index.get("movies", "tt1").unwrap().writers_names, vec!["Last Writer"]);
}

#[tokio::test]
async fn test_unresolved_writer_skips_row_only() {
    let index = Arc::new(MockIndex::new());
    let mut bad = row("tt2");
    bad.writers = r#"[{"id":"w9"}]"#.to_string();
    let source = MockSource::new(
        vec![WriterRef::new("w1", "Jane Doe")],
        vec![row("tt1"), bad, row("tt3")],
    );

    let report = pipeline(source, index.clone()).run("movies").await.unwrap();

    assert_eq!(report.rows_read, 3);
    assert_eq!(report.transformed(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id, "tt2");
    assert_eq!(
        report.skipped[0].reason,
        TransformError::UnresolvedWriterReference {
            id: "tt2".to_string(),
            writer_id: "w9".to_string()
        }
    );
    assert_eq!(report.load.attempted, 2);
    assert!(index.get("movies", "tt2").is_none());
    assert_eq!(index.count("movies"), 2);
}

#[tokio::test]
async fn test_abort_policy_loads_nothing() {
    let index = Arc::new(MockIndex::new());
    let mut bad = row("tt2");
    bad.actors_ids = Some("a1,a2".to_string());
    bad.actors_names = Some("Alice".to_string());
    let source = MockSource::new(Vec::new(), vec![row("tt1"), bad]);

    let pipeline = Pipeline::new(
        Arc::new(source),
        MovieProcessor::with_policy(RowErrorPolicy::Abort),
        BulkLoader::new(index.clone()),
    );
    let result = pipeline.run("movies").await;

    assert!(matches!(
        result.unwrap_err(),
        IngestError::RowRejected(TransformError::MalformedActorList { .. })
    ));
    assert_eq!(index.request_count(), 0);
}

#[tokio::test]
async fn test_source_unavailable_aborts_before_load() {
    let index = Arc::new(MockIndex::new());

    let result = pipeline(MockSource::unavailable(), index.clone())
        .run("movies")
        .await;

    assert!(matches!(result.unwrap_err(), IngestError::SourceUnavailable(_)));
    assert_eq!(index.request_count(), 0);
    assert!(index.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_reload_overwrites_by_id() {
    let index = Arc::new(MockIndex::new());
    let rows = vec![row("tt1"), row("tt2")];

    pipeline(MockSource::new(Vec::new(), rows.clone()), index.clone())
        .run("movies")
        .await
        .unwrap();

    let mut updated = rows;
    updated[0].title = "Renamed".to_string();
    updated[0].imdb_rating = "9.1".to_string();
    pipeline(MockSource::new(Vec::new(), updated), index.clone())
        .run("movies")
        .await
        .unwrap();

    assert_eq!(index.count("movies"), 2);
    let doc = index.get("movies", "tt1").unwrap();
    assert_eq!(doc.title, "Renamed");
    assert_eq!(doc.imdb_rating, Some(9.1));
}

#[tokio::test]
async fn test_partial_failure_isolation() {
    let index = Arc::new(MockIndex::rejecting(&["tt3"]));
    let rows: Vec<SourceRow> = (1..=5).map(|i| row(&format!("tt{}", i))).collect();

    let report = pipeline(MockSource::new(Vec::new(), rows), index.clone())
        .run("movies")
        .await
        .unwrap();

    assert_eq!(report.load.attempted, 5);
    assert_eq!(report.load.succeeded, 4);
    assert_eq!(report.load.failures.len(), 1);
    assert_eq!(report.load.failures[0].id, "tt3");
    for id in ["tt1", "tt2", "tt4", "tt5"] {
        assert!(index.get("movies", id).is_some(), "{} should be indexed", id);
    }
    assert!(index.get("movies", "tt3").is_none());
}

#[tokio::test]
async fn test_transport_failure_fails_run() {
    let index = Arc::new(MockIndex::down());
    let loader = BulkLoader::with_config(
        index.clone(),
        LoaderConfig {
            batch_size: None,
            max_retries: 1,
            retry_backoff: std::time::Duration::ZERO,
        },
    );
    let pipeline = Pipeline::new(
        Arc::new(MockSource::new(Vec::new(), vec![row("tt1")])),
        MovieProcessor::new(),
        loader,
    );

    let result = pipeline.run("movies").await;

    assert!(matches!(
        result.unwrap_err(),
        IngestError::TransportFailure {
            attempts: 2,
            indexed_before: 0,
            ..
        }
    ));
    assert_eq!(index.request_count(), 2);
}

#[tokio::test]
async fn test_skip_index_preparation() {
    let index = Arc::new(MockIndex::new());
    let pipeline = Pipeline::with_config(
        Arc::new(MockSource::new(Vec::new(), vec![row("tt1")])),
        MovieProcessor::new(),
        BulkLoader::new(index.clone()),
        PipelineConfig {
            ensure_index: false,
        },
    );

    pipeline.run("movies").await.unwrap();

    assert!(index.created.lock().unwrap().is_empty());
    assert_eq!(index.count("movies"), 1);
}

#[tokio::test]
async fn test_empty_source() {
    let index = Arc::new(MockIndex::new());

    let report = pipeline(MockSource::new(Vec::new(), Vec::new()), index.clone())
        .run("movies")
        .await
        .unwrap();

    assert_eq!(report.rows_read, 0);
    assert_eq!(report.load.attempted, 0);
    assert_eq!(index.request_count(), 0);
}
