//! Top-level query compilation entry points.
//!
//! Ties the builders together: normalized options plus an optional base
//! predicate (scope, visibility) become a full set of executor inputs,
//! and executor output plus the coerced paging values become the
//! response envelope.

use crate::config::QueryConfig;
use crate::error::AppResult;

use super::filter::build_filter;
use super::params::QueryOptions;
use super::pagination::{coerce_limit, coerce_offset};
use super::projection::build_projection;
use super::sort::build_sort;
use super::types::{Page, PaginationMeta, Predicate, QueryInput, QueryOutput};
use super::visibility::{DocumentId, Identity, comment_visibility};

/// Compile list-endpoint query options into executor inputs.
pub fn compile(options: &QueryOptions, config: &QueryConfig) -> QueryInput {
    compile_with_base(options, Predicate::All, config)
}

/// Compile with an extra base predicate ANDed in front of the
/// options-derived filter.
pub fn compile_with_base(
    options: &QueryOptions,
    base: Predicate,
    config: &QueryConfig,
) -> QueryInput {
    let filter = Predicate::and(vec![base, build_filter(options)]);
    let projection = build_projection(options.fields.as_deref());
    let sort = build_sort(options.sort_by.as_deref(), options.sort_order);
    let limit = coerce_limit(options.limit.as_deref(), config);
    let offset = coerce_offset(options.offset.as_deref());

    tracing::debug!(?filter, limit, offset, "compiled query");

    QueryInput {
        filter,
        projection,
        sort,
        limit,
        offset,
    }
}

/// Compile the comment list for a post, applying visibility rules for the
/// requester. A scope identifier that cannot address a post is rejected
/// here, before any predicate is built.
pub fn compile_comments(
    post_id: &str,
    identity: &Identity,
    options: &QueryOptions,
    config: &QueryConfig,
) -> AppResult<QueryInput> {
    let post_id = DocumentId::parse(post_id)?;
    Ok(compile_with_base(
        options,
        comment_visibility(&post_id, identity),
        config,
    ))
}

impl Page {
    /// Assemble the response envelope from executor output and the coerced
    /// paging values the query ran with.
    pub fn assemble(output: QueryOutput, limit: u64, offset: u64) -> Self {
        Self {
            items: output.documents,
            pagination: PaginationMeta::new(output.total, limit, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::query::types::{SortDirection, SortField};

    #[test]
    fn empty_options_compile_to_match_all_defaults() {
        let input = compile(&QueryOptions::default(), &QueryConfig::default());

        assert_eq!(input.filter, Predicate::All);
        assert_eq!(input.projection, None);
        assert_eq!(
            input.sort,
            vec![
                SortField::new("date", SortDirection::Desc),
                SortField::new("createdAt", SortDirection::Desc),
            ]
        );
        assert_eq!((input.limit, input.offset), (20, 0));
    }

    #[test]
    fn base_predicate_is_anded_in_front() {
        let options = QueryOptions {
            search: Some("garden".to_string()),
            ..Default::default()
        };
        let base = Predicate::eq("status", crate::query::types::Value::string("open"));
        let input = compile_with_base(&options, base.clone(), &QueryConfig::default());

        let Predicate::AllOf(clauses) = input.filter else {
            panic!("expected base AND filter");
        };
        assert_eq!(clauses[0], base);
        assert!(matches!(clauses[1], Predicate::AnyOf(_)));
    }

    #[test]
    fn bad_post_id_is_rejected_before_compilation() {
        let result = compile_comments(
            "not-a-post",
            &Identity::Anonymous,
            &QueryOptions::default(),
            &QueryConfig::default(),
        );
        assert!(matches!(result, Err(AppError::InvalidIdentifier(_))));
    }

    #[test]
    fn envelope_carries_items_and_meta() {
        let output = QueryOutput {
            documents: vec![serde_json::json!({"title": "t"})],
            total: 47,
        };
        let page = Page::assemble(output, 20, 0);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.total, 47);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_more);
    }
}
