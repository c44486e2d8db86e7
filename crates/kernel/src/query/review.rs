//! Moderation review-queue filters.
//!
//! The admin review queue lists flagged content with equality facets and
//! a dynamic sort field. Visibility rules do not apply here; the queue
//! is reachable only by moderators.

use serde::{Deserialize, Serialize};

use super::types::{Predicate, SortDirection, SortField, SortSpec, Value};

/// Default and tie-breaking sort field for the queue.
const FLAGGED_AT: &str = "flaggedAt";

/// Review outcome recorded on flagged content.
///
/// `Reviewed` is a query-only sentinel selecting everything already
/// decided (approved or rejected), never a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    Reviewed,
}

impl ReviewStatus {
    /// The stored string form. `Reviewed` has none.
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
            ReviewStatus::Reviewed => "reviewed",
        }
    }
}

/// Raw review-queue query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueueFilter {
    pub review_status: Option<ReviewStatus>,
    pub content_type: Option<String>,
    pub decision: Option<String>,
    pub author_id: Option<String>,
}

/// Build the review-queue filter.
pub fn build_review_filter(filter: &ReviewQueueFilter) -> Predicate {
    let mut clauses = Vec::new();

    match filter.review_status {
        Some(ReviewStatus::Reviewed) => clauses.push(Predicate::In {
            field: "reviewStatus".to_string(),
            values: vec![
                Value::string(ReviewStatus::Approved.as_str()),
                Value::string(ReviewStatus::Rejected.as_str()),
            ],
        }),
        Some(status) => {
            clauses.push(Predicate::eq("reviewStatus", Value::string(status.as_str())));
        }
        None => {}
    }

    if let Some(content_type) = filter.content_type.as_deref() {
        clauses.push(Predicate::eq("contentType", Value::string(content_type)));
    }
    if let Some(decision) = filter.decision.as_deref() {
        clauses.push(Predicate::eq("decision", Value::string(decision)));
    }
    if let Some(author_id) = filter.author_id.as_deref() {
        clauses.push(Predicate::eq("authorId", Value::string(author_id)));
    }

    Predicate::and(clauses)
}

/// Build the review-queue sort. Any stored field may be the primary key;
/// flag time is the default and the tie-breaker.
pub fn build_review_sort(sort_by: Option<&str>, order: SortDirection) -> SortSpec {
    let primary = sort_by.filter(|s| !s.is_empty()).unwrap_or(FLAGGED_AT);
    let mut spec = vec![SortField::new(primary, order)];
    if primary != FLAGGED_AT {
        spec.push(SortField::new(FLAGGED_AT, SortDirection::Desc));
    }
    spec
}
