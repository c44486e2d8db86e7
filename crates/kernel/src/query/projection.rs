//! Projection construction from field-selector lists.

use std::collections::BTreeMap;

use super::types::Projection;

/// Identifier field included by default.
const ID_FIELD: &str = "_id";

/// Build an inclusion/exclusion projection from field selectors.
///
/// Returns `None` (project everything) when no selectors are given. A
/// leading `-` excludes the named field; the identifier field is included
/// unless explicitly excluded; naming a field more than once, the last
/// selector wins. Mixed include/exclude selectors are passed through
/// unvalidated; whether a store accepts the combination is an executor
/// concern.
pub fn build_projection(fields: Option<&[String]>) -> Option<Projection> {
    let fields = fields?;
    if fields.is_empty() {
        return None;
    }

    let mut map = BTreeMap::new();

    if !fields.iter().any(|f| f == "-_id") {
        map.insert(ID_FIELD.to_string(), true);
    }

    for field in fields {
        match field.strip_prefix('-') {
            Some(name) => map.insert(name.to_string(), false),
            None => map.insert(field.clone(), true),
        };
    }

    Some(Projection { fields: map })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn absent_or_empty_means_all_fields() {
        assert_eq!(build_projection(None), None);
        assert_eq!(build_projection(Some(&[])), None);
    }

    #[test]
    fn identifier_included_by_default() {
        let projection = build_projection(Some(&selectors(&["title"]))).unwrap();
        assert_eq!(projection.fields.get("_id"), Some(&true));
        assert_eq!(projection.fields.get("title"), Some(&true));
    }

    #[test]
    fn explicit_identifier_exclusion_overrides_default() {
        let projection = build_projection(Some(&selectors(&["-_id", "title"]))).unwrap();
        assert_eq!(projection.fields.get("_id"), Some(&false));
        assert_eq!(projection.fields.get("title"), Some(&true));
        assert_eq!(projection.fields.len(), 2);
    }

    #[test]
    fn exclusion_selectors_mark_fields_false() {
        let projection = build_projection(Some(&selectors(&["-password"]))).unwrap();
        assert_eq!(projection.fields.get("password"), Some(&false));
        assert_eq!(projection.fields.get("_id"), Some(&true));
    }

    #[test]
    fn last_selector_wins_for_repeated_fields() {
        let projection =
            build_projection(Some(&selectors(&["title", "-title"]))).unwrap();
        assert_eq!(projection.fields.get("title"), Some(&false));

        let projection =
            build_projection(Some(&selectors(&["-title", "title"]))).unwrap();
        assert_eq!(projection.fields.get("title"), Some(&true));
    }
}
