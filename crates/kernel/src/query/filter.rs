//! Filter construction from search text and tag selections.

use super::params::QueryOptions;
use super::types::{Predicate, Value};

/// Text-bearing fields free-text search runs against.
const SEARCH_FIELDS: [&str; 3] = ["title", "body", "description"];

/// Field holding a document's tag collection.
const TAGS_FIELD: &str = "tags";

/// Build the base filter for a list query.
///
/// Free-text search becomes an OR of case-insensitive substring matches
/// across the text-bearing fields; tag selections require the document's
/// tag collection to intersect the requested set. Both present combine
/// with AND; neither present matches every document.
pub fn build_filter(options: &QueryOptions) -> Predicate {
    let mut clauses = Vec::new();

    if let Some(search) = options.search.as_deref() {
        clauses.push(Predicate::AnyOf(
            SEARCH_FIELDS
                .iter()
                .map(|field| Predicate::contains_ci(*field, search))
                .collect(),
        ));
    }

    if let Some(tags) = options.tags.as_deref() {
        if !tags.is_empty() {
            clauses.push(Predicate::In {
                field: TAGS_FIELD.to_string(),
                values: tags.iter().map(Value::string).collect(),
            });
        }
    }

    Predicate::and(clauses)
}
