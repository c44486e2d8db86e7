//! Query parameter normalization.
//!
//! Turns the raw key-value parameters the HTTP layer hands over into a
//! typed options record. Normalization never fails: unrecognized or
//! malformed values fall back to defaults here or downstream.

use serde::Deserialize;

use super::types::SortDirection;

/// Raw query-string parameters, exactly as parsed from the URL.
///
/// Every field is an optional untyped string so the struct is directly
/// extractable with `axum::extract::Query`. Numeric coercion is deferred
/// to the pagination calculator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueryParams {
    pub fields: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub tags: Option<String>,
}

/// Typed query options produced by normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Requested field selectors (`-` prefix excludes).
    pub fields: Option<Vec<String>>,

    /// Requested page size, still untyped.
    pub limit: Option<String>,

    /// Requested skip, still untyped.
    pub offset: Option<String>,

    /// Symbolic sort key.
    pub sort_by: Option<String>,

    /// Sort direction; always concrete, defaults to descending.
    pub sort_order: SortDirection,

    /// Free-text search.
    pub search: Option<String>,

    /// Requested tag selections.
    pub tags: Option<Vec<String>>,
}

impl QueryOptions {
    /// Normalize raw request parameters.
    pub fn from_raw(raw: &RawQueryParams) -> Self {
        Self {
            fields: raw.fields.as_deref().map(split_csv),
            limit: non_empty(raw.limit.as_deref()),
            offset: non_empty(raw.offset.as_deref()),
            sort_by: non_empty(raw.sort_by.as_deref()),
            sort_order: parse_sort_order(raw.sort_order.as_deref()),
            search: non_empty(raw.search.as_deref()),
            tags: raw.tags.as_deref().map(split_csv),
        }
    }
}

/// Split a comma-separated value, discarding empty entries so consecutive
/// or trailing commas never produce empty selectors.
fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Empty strings count as absent, matching how the URL layer reports
/// `?search=` with no value.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// An unrecognized direction is treated as absent, never an error.
fn parse_sort_order(value: Option<&str>) -> SortDirection {
    match value {
        Some("asc") => SortDirection::Asc,
        Some("desc") => SortDirection::Desc,
        _ => SortDirection::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_normalizes_to_defaults() {
        let options = QueryOptions::from_raw(&RawQueryParams::default());
        assert_eq!(options, QueryOptions::default());
        assert_eq!(options.sort_order, SortDirection::Desc);
    }

    #[test]
    fn fields_and_tags_split_on_commas() {
        let raw = RawQueryParams {
            fields: Some("title,author".to_string()),
            tags: Some("sports,health".to_string()),
            ..Default::default()
        };
        let options = QueryOptions::from_raw(&raw);
        assert_eq!(
            options.fields,
            Some(vec!["title".to_string(), "author".to_string()])
        );
        assert_eq!(
            options.tags,
            Some(vec!["sports".to_string(), "health".to_string()])
        );
    }

    #[test]
    fn consecutive_and_trailing_commas_drop_empty_entries() {
        let raw = RawQueryParams {
            tags: Some("sports,,health,".to_string()),
            ..Default::default()
        };
        let options = QueryOptions::from_raw(&raw);
        assert_eq!(
            options.tags,
            Some(vec!["sports".to_string(), "health".to_string()])
        );
    }

    #[test]
    fn unrecognized_sort_order_falls_back_to_descending() {
        let raw = RawQueryParams {
            sort_order: Some("sideways".to_string()),
            ..Default::default()
        };
        assert_eq!(
            QueryOptions::from_raw(&raw).sort_order,
            SortDirection::Desc
        );
    }

    #[test]
    fn ascending_sort_order_recognized() {
        let raw = RawQueryParams {
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        assert_eq!(QueryOptions::from_raw(&raw).sort_order, SortDirection::Asc);
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let raw = RawQueryParams {
            search: Some(String::new()),
            limit: Some(String::new()),
            sort_by: Some(String::new()),
            ..Default::default()
        };
        let options = QueryOptions::from_raw(&raw);
        assert_eq!(options.search, None);
        assert_eq!(options.limit, None);
        assert_eq!(options.sort_by, None);
    }

    #[test]
    fn normalization_is_idempotent_on_identical_input() {
        let raw = RawQueryParams {
            fields: Some("-_id,title".to_string()),
            limit: Some("50".to_string()),
            sort_by: Some("likes".to_string()),
            sort_order: Some("asc".to_string()),
            search: Some("garden".to_string()),
            tags: Some("sports".to_string()),
            ..Default::default()
        };
        assert_eq!(QueryOptions::from_raw(&raw), QueryOptions::from_raw(&raw));
    }
}
