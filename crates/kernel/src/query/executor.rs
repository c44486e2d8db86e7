//! Query executor boundary and the in-memory reference executor.
//!
//! Executors translate the neutral filter/projection/sort into actual
//! storage calls. [`MemoryExecutor`] is the reference implementation of
//! the predicate semantics over plain JSON documents, so the compiler is
//! testable without a live database.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::AppResult;

use super::types::{Predicate, Projection, QueryInput, QueryOutput, SortDirection, SortSpec, Value};

/// Storage adapter executing compiled queries.
///
/// Implementations return one page of raw documents plus the total count
/// before paging; retry and timeout policy for the round trip lives here,
/// never in the compiler.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, input: &QueryInput) -> AppResult<QueryOutput>;
}

/// In-memory executor over a fixed document set.
#[derive(Debug, Clone, Default)]
pub struct MemoryExecutor {
    documents: Vec<JsonValue>,
}

impl MemoryExecutor {
    /// Executor over the given documents.
    pub fn new(documents: Vec<JsonValue>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn execute(&self, input: &QueryInput) -> AppResult<QueryOutput> {
        let mut matched: Vec<&JsonValue> = self
            .documents
            .iter()
            .filter(|doc| evaluate(&input.filter, doc))
            .collect();
        let total = matched.len() as u64;

        matched.sort_by(|a, b| compare_documents(a, b, &input.sort));

        let documents = matched
            .into_iter()
            .skip(input.offset as usize)
            .take(input.limit as usize)
            .map(|doc| apply_projection(doc, input.projection.as_ref()))
            .collect();

        Ok(QueryOutput { documents, total })
    }
}

/// Evaluate a predicate against a document.
pub fn evaluate(predicate: &Predicate, doc: &JsonValue) -> bool {
    match predicate {
        Predicate::All => true,
        Predicate::Eq { field, value } => {
            lookup(doc, field).is_some_and(|found| value_eq(found, value))
        }
        Predicate::In { field, values } => match lookup(doc, field) {
            // An array field intersects the requested set.
            Some(JsonValue::Array(items)) => items
                .iter()
                .any(|item| values.iter().any(|value| value_eq(item, value))),
            Some(found) => values.iter().any(|value| value_eq(found, value)),
            None => false,
        },
        Predicate::ContainsCi { field, value } => lookup(doc, field)
            .and_then(JsonValue::as_str)
            .is_some_and(|s| s.to_lowercase().contains(&value.to_lowercase())),
        Predicate::Gte { field, value } => lookup(doc, field)
            .and_then(|found| compare_scalar(found, value))
            .is_some_and(|ordering| ordering != Ordering::Less),
        Predicate::Lte { field, value } => lookup(doc, field)
            .and_then(|found| compare_scalar(found, value))
            .is_some_and(|ordering| ordering != Ordering::Greater),
        Predicate::Exists { field, exists } => lookup(doc, field).is_some() == *exists,
        Predicate::AllOf(branches) => branches.iter().all(|branch| evaluate(branch, doc)),
        Predicate::AnyOf(branches) => branches.iter().any(|branch| evaluate(branch, doc)),
    }
}

/// Resolve a dotted field path within a document.
fn lookup<'a>(doc: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = doc;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Scalar equality between a document value and a predicate value.
fn value_eq(found: &JsonValue, value: &Value) -> bool {
    match value {
        // Native ids are stored in extended-JSON form.
        Value::Id { oid } => found
            .get("$oid")
            .and_then(JsonValue::as_str)
            .is_some_and(|s| s.eq_ignore_ascii_case(oid)),
        Value::String(s) => found.as_str() == Some(s.as_str()),
        Value::Integer(i) => found.as_f64() == Some(*i as f64),
        Value::Float(f) => found.as_f64() == Some(*f),
        Value::Boolean(b) => found.as_bool() == Some(*b),
    }
}

/// Ordering between a document value and a predicate value, for range
/// clauses. Only numbers and strings order; anything else is no match.
fn compare_scalar(found: &JsonValue, value: &Value) -> Option<Ordering> {
    match value {
        Value::Integer(i) => found.as_f64()?.partial_cmp(&(*i as f64)),
        Value::Float(f) => found.as_f64()?.partial_cmp(f),
        Value::String(s) => Some(found.as_str()?.cmp(s.as_str())),
        Value::Id { .. } | Value::Boolean(_) => None,
    }
}

/// Multi-key document comparison for sorting.
fn compare_documents(a: &JsonValue, b: &JsonValue, sort: &SortSpec) -> Ordering {
    for key in sort {
        let ordering = compare_sort_values(
            sort_value(a, &key.field).as_ref(),
            sort_value(b, &key.field).as_ref(),
        );
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Resolve a dotted path for sorting. A `length` segment on an array
/// yields the array length, matching how the source data stores comment
/// counts.
fn sort_value(doc: &JsonValue, path: &str) -> Option<JsonValue> {
    let mut current = doc;
    for segment in path.split('.') {
        if segment == "length" {
            if let JsonValue::Array(items) = current {
                return Some(JsonValue::from(items.len() as u64));
            }
        }
        current = current.get(segment)?;
    }
    Some(current.clone())
}

/// Compare two optional sort values. Missing values order before present
/// ones ascending, mirroring stores that treat a missing field as the
/// lowest value; mixed types order by a fixed type rank.
fn compare_sort_values(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (JsonValue::Number(x), JsonValue::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
            (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
            _ => type_rank(a).cmp(&type_rank(b)),
        },
    }
}

fn type_rank(value: &JsonValue) -> u8 {
    match value {
        JsonValue::Null => 0,
        JsonValue::Number(_) => 1,
        JsonValue::String(_) => 2,
        JsonValue::Bool(_) => 3,
        JsonValue::Array(_) => 4,
        JsonValue::Object(_) => 5,
    }
}

/// Apply a projection to a document.
///
/// The identifier field is special, as in document stores: the mode is
/// decided by the non-identifier entries (any inclusion makes it an
/// inclusion projection, otherwise it is an exclusion projection), and
/// `_id` then follows its own flag. With no non-identifier entries the
/// `_id` flag alone is honored against the full document.
fn apply_projection(doc: &JsonValue, projection: Option<&Projection>) -> JsonValue {
    let Some(projection) = projection else {
        return doc.clone();
    };
    let JsonValue::Object(map) = doc else {
        return doc.clone();
    };

    let inclusion_mode = projection
        .fields
        .iter()
        .any(|(field, included)| *included && field != "_id");

    let kept = map.iter().filter(|(key, _)| {
        let flag = projection.fields.get(key.as_str()).copied();
        if *key == "_id" {
            flag.unwrap_or(true)
        } else if inclusion_mode {
            flag == Some(true)
        } else {
            flag != Some(false)
        }
    });

    JsonValue::Object(kept.map(|(k, v)| (k.clone(), v.clone())).collect())
}
