// src/github/mod.rs
// =============================================================================
// This module handles talking to the GitHub search API.
//
// Currently implements:
// - A search client that carries the bearer token and required headers
// - Typed decoding of search result pages
// - A lazy, paginated stream of repository records
//
// Future enhancements (stretch goals):
// - Rate-limit aware backoff between pages
// - Support for other forges (GitLab, Gitea) behind the same record type
// =============================================================================

mod fetch;

// Re-export the public fetch surface from fetch.rs
pub use fetch::{fetch_top_repositories, RepoRecord, SearchClient};
