//! Pagination coercion and page math.
//!
//! Requests carry `limit`/`offset` as untyped strings; coercion favors
//! silent, safe defaults over failure. Page math always runs on the final
//! coerced values, never the raw input.

use crate::config::QueryConfig;

use super::types::PaginationMeta;

/// Coerce an untyped page size to a positive integer.
///
/// Non-numeric or non-positive input falls back to the configured default;
/// oversized requests are capped at the configured maximum.
pub fn coerce_limit(raw: Option<&str>, config: &QueryConfig) -> u64 {
    let limit = raw
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map_or(config.default_limit, |v| v as u64);

    if limit > config.max_limit {
        tracing::warn!(
            requested = limit,
            capped = config.max_limit,
            "limit exceeds maximum, capping"
        );
        config.max_limit
    } else {
        limit
    }
}

/// Coerce an untyped skip to a non-negative integer (default 0).
pub fn coerce_offset(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 0)
        .map_or(0, |v| v as u64)
}

impl PaginationMeta {
    /// Build pagination metadata from the total count and the coerced
    /// limit/offset. `limit` must be positive, which coercion guarantees.
    pub fn new(total: u64, limit: u64, offset: u64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset + limit < total,
            page: offset / limit + 1,
            total_pages: total.div_ceil(limit),
        }
    }
}
