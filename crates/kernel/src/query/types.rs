//! Query engine types.
//!
//! The neutral representation every builder targets:
//! - Predicate: storage-agnostic boolean filter expression
//! - Projection: field inclusion/exclusion map
//! - SortSpec: ordered (field, direction) list
//! - PaginationMeta / Page: page math and the response envelope
//!
//! Executors translate these into actual storage calls; nothing here
//! performs I/O.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scalar value a predicate compares against.
///
/// Native document identifiers serialize in extended-JSON form
/// (`{"$oid": "..."}`) so they stay distinguishable from plain strings;
/// historical data stores references both ways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Native document identifier (24 hex characters).
    Id {
        #[serde(rename = "$oid")]
        oid: String,
    },
    /// Integer value.
    Integer(i64),
    /// Float value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// String value.
    String(String),
}

impl Value {
    /// Native identifier value.
    pub fn id(hex: impl Into<String>) -> Self {
        Value::Id { oid: hex.into() }
    }

    /// String value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }
}

/// Storage-agnostic filter predicate.
///
/// Compare-style variants look a named field up in the document; the
/// logical variants combine sub-predicates. `All` matches every document
/// and is the result of compiling an empty query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Matches every document.
    All,
    /// Field equals value.
    Eq { field: String, value: Value },
    /// Field (or any element of an array field) is one of the values.
    In { field: String, values: Vec<Value> },
    /// Case-insensitive substring match on a string field. The value is
    /// always a literal pattern, never anything an executor interprets as
    /// code.
    ContainsCi { field: String, value: String },
    /// Field is greater than or equal to the value.
    Gte { field: String, value: Value },
    /// Field is less than or equal to the value.
    Lte { field: String, value: Value },
    /// Field presence check. `exists: false` matches documents missing the
    /// field entirely (legacy records predating the field).
    Exists { field: String, exists: bool },
    /// Every branch must match.
    AllOf(Vec<Predicate>),
    /// At least one branch must match.
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    /// Field equality clause.
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Predicate::Eq {
            field: field.into(),
            value,
        }
    }

    /// Case-insensitive substring clause.
    pub fn contains_ci(field: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::ContainsCi {
            field: field.into(),
            value: value.into(),
        }
    }

    /// AND clauses together. Always-true branches are dropped and nested
    /// ANDs are flattened; an empty result collapses to `All` and a single
    /// clause stands alone.
    pub fn and(clauses: Vec<Predicate>) -> Self {
        let mut flattened = Vec::new();
        for clause in clauses {
            match clause {
                Predicate::All => {}
                Predicate::AllOf(inner) => flattened.extend(inner),
                other => flattened.push(other),
            }
        }
        match flattened.len() {
            0 => Predicate::All,
            1 => flattened.remove(0),
            _ => Predicate::AllOf(flattened),
        }
    }
}

/// Field inclusion/exclusion projection.
///
/// `true` includes the named field, `false` excludes it. Absence of a
/// projection altogether (the `Option<Projection>` a builder returns)
/// means "return all fields".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub fields: BTreeMap<String, bool>,
}

impl Projection {
    /// Projection excluding exactly the named fields.
    pub fn excluding<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|f| (f.into(), false)).collect(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// A single (field, direction) sort component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Document field path (dots address nested values).
    pub field: String,

    /// Sort direction.
    pub direction: SortDirection,
}

impl SortField {
    /// Sort component for a field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Ordered sort specification. Builders guarantee it is never empty and
/// always ends in a deterministic tie-breaker.
pub type SortSpec = Vec<SortField>;

/// Pagination metadata for response envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total matching documents before paging.
    pub total: u64,

    /// Page size actually used for the query.
    pub limit: u64,

    /// Skip actually used for the query.
    pub offset: u64,

    /// Whether another page exists past this one.
    pub has_more: bool,

    /// Current page number (1-indexed).
    pub page: u64,

    /// Total number of pages.
    pub total_pages: u64,
}

/// Inputs handed to a query executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryInput {
    /// Filter predicate selecting documents.
    pub filter: Predicate,

    /// Field projection; `None` returns all fields.
    pub projection: Option<Projection>,

    /// Sort specification.
    pub sort: SortSpec,

    /// Page size.
    pub limit: u64,

    /// Documents to skip.
    pub offset: u64,
}

/// Raw executor results: one page of documents plus the total count
/// before paging.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    /// Documents for the requested page.
    pub documents: Vec<serde_json::Value>,

    /// Total matching documents.
    pub total: u64,
}

/// Response envelope: documents plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Documents for this page.
    pub items: Vec<serde_json::Value>,

    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
