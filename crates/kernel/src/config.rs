//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Query engine configuration.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Page size applied when a request omits or mangles `limit` (default: 20).
    pub default_limit: u64,

    /// Hard cap on the requested page size (default: 100).
    pub max_limit: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl QueryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let default_limit = env::var("QUERY_DEFAULT_LIMIT")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .context("QUERY_DEFAULT_LIMIT must be a positive integer")?;

        let max_limit = env::var("QUERY_MAX_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .context("QUERY_MAX_LIMIT must be a positive integer")?;

        if default_limit == 0 || max_limit == 0 {
            anyhow::bail!("page size limits must be positive");
        }
        if default_limit > max_limit {
            anyhow::bail!("QUERY_DEFAULT_LIMIT must not exceed QUERY_MAX_LIMIT");
        }

        Ok(Self {
            default_limit,
            max_limit,
        })
    }
}
