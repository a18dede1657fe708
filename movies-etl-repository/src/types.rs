//! Result types for search index bulk operations.

/// Outcome of a single document within a bulk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemOutcome {
    /// The document's identifier in the index.
    pub id: String,
    /// Rejection reason reported by the index, `None` when the document was indexed.
    pub error: Option<String>,
}

impl BulkItemOutcome {
    pub fn indexed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            error: None,
        }
    }

    pub fn rejected(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            error: Some(reason.into()),
        }
    }

    /// Whether the index accepted the document.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a bulk request, one outcome per submitted document in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkIndexSummary {
    pub items: Vec<BulkItemOutcome>,
}

impl BulkIndexSummary {
    pub fn new(items: Vec<BulkItemOutcome>) -> Self {
        Self { items }
    }

    /// Number of documents submitted.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Number of documents the index accepted.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_success()).count()
    }

    /// Number of documents the index rejected.
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Iterate over rejected documents.
    pub fn failures(&self) -> impl Iterator<Item = &BulkItemOutcome> {
        self.items.iter().filter(|i| !i.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let summary = BulkIndexSummary::new(vec![
            BulkItemOutcome::indexed("tt1"),
            BulkItemOutcome::rejected("tt2", "mapper_parsing_exception"),
            BulkItemOutcome::indexed("tt3"),
        ]);

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.failures().next().unwrap().id, "tt2");
    }

    #[test]
    fn test_empty_summary() {
        let summary = BulkIndexSummary::default();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.failed(), 0);
    }
}
