//! Bulk request encoding and response decoding.
//!
//! A bulk body holds two lines per document: an action line naming the target
//! index and the document id, then the document itself. The response lists one
//! item per action, in the order the actions were sent.

use movies_etl_shared::MovieDocument;
use serde_json::{json, Value};

use crate::errors::SearchIndexError;
use crate::types::{BulkIndexSummary, BulkItemOutcome};

/// Build the bulk request lines for `documents`.
///
/// Uses the `index` action, which creates or replaces the document stored
/// under the same `_id`.
pub fn build_bulk_lines(
    index: &str,
    documents: &[MovieDocument],
) -> Result<Vec<Value>, SearchIndexError> {
    let mut lines = Vec::with_capacity(documents.len() * 2);
    for doc in documents {
        lines.push(json!({ "index": { "_index": index, "_id": doc.document_id() } }));
        lines.push(serde_json::to_value(doc)?);
    }
    Ok(lines)
}

/// Decode a bulk response into one outcome per submitted document.
///
/// Items are matched to documents by position. The `_id` echoed by the index
/// is ignored in favour of the submitted id, which is what the caller knows
/// the document by.
pub fn parse_bulk_response(
    response: &Value,
    documents: &[MovieDocument],
) -> Result<BulkIndexSummary, SearchIndexError> {
    let items = response
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchIndexError::parse("Bulk response has no items array"))?;

    if items.len() != documents.len() {
        return Err(SearchIndexError::parse(format!(
            "Bulk response has {} items for {} submitted documents",
            items.len(),
            documents.len()
        )));
    }

    let outcomes = items
        .iter()
        .zip(documents)
        .map(|(item, doc)| -> Result<BulkItemOutcome, SearchIndexError> {
            // Each item is keyed by its action name, e.g. {"index": {...}}.
            let result = item
                .as_object()
                .and_then(|obj| obj.values().next())
                .ok_or_else(|| {
                    SearchIndexError::parse(format!("Malformed bulk item for document {}", doc.id))
                })?;

            Ok(match result.get("error").filter(|e| !e.is_null()) {
                Some(error) => BulkItemOutcome::rejected(&doc.id, error_reason(error)),
                None => BulkItemOutcome::indexed(&doc.id),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BulkIndexSummary::new(outcomes))
}

fn error_reason(error: &Value) -> String {
    match error {
        Value::String(reason) => reason.clone(),
        Value::Object(obj) => {
            let kind = obj.get("type").and_then(Value::as_str);
            let reason = obj.get("reason").and_then(Value::as_str);
            match (kind, reason) {
                (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
                (None, Some(reason)) => reason.to_string(),
                (Some(kind), None) => kind.to_string(),
                (None, None) => error.to_string(),
            }
        }
        other => other.to_string(),
    }
}
