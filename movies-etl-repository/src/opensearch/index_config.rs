//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the movies index.
//! The search API sorts on `title.raw` and runs fuzzy multi-field matches over
//! the text fields, so the mapping has to provide both.

use serde_json::{json, Value};

/// Default name of the movies index.
pub const DEFAULT_INDEX_NAME: &str = "movies";

/// Get the index settings and mappings for the movies index.
///
/// The configuration includes:
/// - **Text fields**: title, description, director and the flattened name lists
/// - **Keyword fields**: ids, genre, and `title.raw` for sorting
/// - **Nested objects**: actors and writers, so id/name pairs stay together
///
/// # Sharding Configuration
///
/// - 1 primary shard
/// - 1 replica for redundancy
pub fn get_index_settings() -> Value {
    let person = json!({
        "type": "nested",
        "dynamic": "strict",
        "properties": {
            "id": { "type": "keyword" },
            "name": { "type": "text", "analyzer": "english" }
        }
    });

    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1,
            "refresh_interval": "1s"
        },
        "mappings": {
            "dynamic": "strict",
            "properties": {
                "id": { "type": "keyword" },
                "imdb_rating": { "type": "float" },
                "genre": { "type": "keyword" },
                "title": {
                    "type": "text",
                    "analyzer": "english",
                    "fields": {
                        "raw": { "type": "keyword" }
                    }
                },
                "description": { "type": "text", "analyzer": "english" },
                "director": { "type": "text", "analyzer": "english" },
                "actors_names": { "type": "text", "analyzer": "english" },
                "writers_names": { "type": "text", "analyzer": "english" },
                "actors": person.clone(),
                "writers": person
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        let properties = &settings["mappings"]["properties"];
        assert_eq!(properties["id"]["type"], "keyword");
        assert_eq!(properties["imdb_rating"]["type"], "float");
        assert_eq!(properties["genre"]["type"], "keyword");
        assert_eq!(properties["title"]["fields"]["raw"]["type"], "keyword");
    }

    #[test]
    fn test_people_are_nested() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];

        for field in ["actors", "writers"] {
            assert_eq!(properties[field]["type"], "nested");
            assert_eq!(properties[field]["properties"]["id"]["type"], "keyword");
            assert_eq!(properties[field]["properties"]["name"]["type"], "text");
        }
    }

    #[test]
    fn test_mapping_covers_document_fields() {
        let settings = get_index_settings();
        let properties = settings["mappings"]["properties"].as_object().unwrap();

        for field in [
            "id",
            "title",
            "imdb_rating",
            "description",
            "genre",
            "actors",
            "actors_names",
            "writers",
            "writers_names",
            "director",
        ] {
            assert!(properties.contains_key(field), "missing mapping for {}", field);
        }
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(DEFAULT_INDEX_NAME, "movies");
    }
}
