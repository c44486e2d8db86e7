//! Marketplace listing filters.
//!
//! Listings have their own facet set (category, condition, price range)
//! and their own sort vocabulary, separate from the forum-style list
//! queries.

use serde::{Deserialize, Serialize};

use super::types::{Predicate, SortDirection, SortField, SortSpec, Value};

/// Only listings still available are ever listed publicly.
const AVAILABLE: &str = "available";

/// Facet sentinel meaning "no filter".
const ALL: &str = "all";

/// Raw listing filter parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    pub category: Option<String>,
    pub condition: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: ListingSort,
}

/// Listing sort options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingSort {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
}

/// Build the listing filter.
///
/// Always scoped to available listings. Category and condition facets are
/// skipped when absent or set to the `all` sentinel; price bounds become
/// range clauses; search runs over the title and both description fields
/// (the plain-text mirror plus the legacy plain description).
pub fn build_listing_filter(filter: &ListingFilter) -> Predicate {
    let mut clauses = vec![Predicate::eq("status", Value::string(AVAILABLE))];

    if let Some(category) = facet(filter.category.as_deref()) {
        clauses.push(Predicate::eq("category", Value::string(category)));
    }
    if let Some(condition) = facet(filter.condition.as_deref()) {
        clauses.push(Predicate::eq("condition", Value::string(condition)));
    }
    // A zero bound is meaningless here, prices start at 0.01.
    if let Some(min) = filter.price_min.filter(|v| *v > 0.0) {
        clauses.push(Predicate::Gte {
            field: "price".to_string(),
            value: Value::Float(min),
        });
    }
    if let Some(max) = filter.price_max.filter(|v| *v > 0.0) {
        clauses.push(Predicate::Lte {
            field: "price".to_string(),
            value: Value::Float(max),
        });
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        clauses.push(Predicate::AnyOf(vec![
            Predicate::contains_ci("title", search),
            Predicate::contains_ci("descriptionPlainText", search),
            Predicate::contains_ci("description", search),
        ]));
    }

    Predicate::and(clauses)
}

/// Build the listing sort specification.
pub fn build_listing_sort(sort: ListingSort) -> SortSpec {
    match sort {
        ListingSort::Newest => vec![SortField::new("createdAt", SortDirection::Desc)],
        ListingSort::Oldest => vec![SortField::new("createdAt", SortDirection::Asc)],
        ListingSort::PriceAsc => vec![
            SortField::new("price", SortDirection::Asc),
            SortField::new("createdAt", SortDirection::Desc),
        ],
        ListingSort::PriceDesc => vec![
            SortField::new("price", SortDirection::Desc),
            SortField::new("createdAt", SortDirection::Desc),
        ],
    }
}

/// A facet is active when present, non-empty, and not the `all` sentinel.
fn facet(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != ALL)
}
