//! Rione kernel library.
//!
//! The query-and-visibility compiler for the Rione community backend: it
//! turns untyped request parameters into storage-agnostic document queries
//! (filter predicate, projection, sort, skip/limit) and compiles the
//! moderation rules that decide which content a requester may see.
//! Request routing, rendering, and the actual storage driver live with the
//! consumers of this crate.

pub mod config;
pub mod error;
pub mod query;
