//! Sort construction from symbolic sort keys.

use serde::{Deserialize, Serialize};

use super::types::{SortDirection, SortField, SortSpec};

/// Symbolic sort keys exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Likes,
    Views,
    Comments,
}

impl SortKey {
    /// Parse a raw `sortBy` value. Unknown keys map to `None`, which
    /// selects the default sort, never an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "date" => Some(SortKey::Date),
            "likes" => Some(SortKey::Likes),
            "views" => Some(SortKey::Views),
            "comments" => Some(SortKey::Comments),
            _ => None,
        }
    }
}

/// Build the concrete sort specification.
///
/// Recency is the universal tie-breaker so result order stays
/// deterministic across pages even when the primary key has ties (many
/// items with zero likes, say). The comment count sorts on the stored
/// array's length.
pub fn build_sort(sort_by: Option<&str>, order: SortDirection) -> SortSpec {
    match sort_by.and_then(SortKey::parse) {
        Some(SortKey::Date) => vec![
            SortField::new("date", order),
            SortField::new("createdAt", order),
        ],
        Some(SortKey::Likes) => vec![
            SortField::new("likes", order),
            SortField::new("date", SortDirection::Desc),
        ],
        Some(SortKey::Views) => vec![
            SortField::new("views", order),
            SortField::new("date", SortDirection::Desc),
        ],
        Some(SortKey::Comments) => vec![
            SortField::new("comments.length", order),
            SortField::new("date", SortDirection::Desc),
        ],
        None => vec![
            SortField::new("date", SortDirection::Desc),
            SortField::new("createdAt", SortDirection::Desc),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likes_ascending_keeps_recency_tie_breaker_descending() {
        let spec = build_sort(Some("likes"), SortDirection::Asc);
        assert_eq!(
            spec,
            vec![
                SortField::new("likes", SortDirection::Asc),
                SortField::new("date", SortDirection::Desc),
            ]
        );
    }

    #[test]
    fn date_sort_applies_direction_to_both_components() {
        let spec = build_sort(Some("date"), SortDirection::Asc);
        assert_eq!(
            spec,
            vec![
                SortField::new("date", SortDirection::Asc),
                SortField::new("createdAt", SortDirection::Asc),
            ]
        );
    }

    #[test]
    fn comments_sort_targets_array_length() {
        let spec = build_sort(Some("comments"), SortDirection::Desc);
        assert_eq!(spec[0], SortField::new("comments.length", SortDirection::Desc));
    }

    #[test]
    fn unknown_key_equals_unset_mapping() {
        let default = build_sort(None, SortDirection::Asc);
        assert_eq!(build_sort(Some("popularity"), SortDirection::Asc), default);
        assert_eq!(
            default,
            vec![
                SortField::new("date", SortDirection::Desc),
                SortField::new("createdAt", SortDirection::Desc),
            ]
        );
    }

    #[test]
    fn spec_is_never_empty() {
        assert!(!build_sort(None, SortDirection::Desc).is_empty());
        assert!(!build_sort(Some("views"), SortDirection::Asc).is_empty());
    }
}
