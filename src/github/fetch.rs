// src/github/fetch.rs
// =============================================================================
// This module pulls repository records out of the GitHub search API.
//
// Strategy:
// - One GET per page of 100 results, pages numbered from 1
// - Records come back as a lazy Stream: nothing is fetched until the
//   consumer asks for the next record, and consuming the stream twice
//   means re-fetching
// - Pagination stops once the requested count has been yielded, or once
//   a short page signals the API has nothing more to give
//
// Failure policy (matches the tool's error taxonomy):
// - Transport errors (DNS, connect, TLS) end the stream with a fatal error
// - A non-2xx response is logged to stderr with its raw body, but the body
//   still goes through the JSON decoder; a body without an `items` array
//   fails decoding and THAT is the fatal error
// =============================================================================

use std::collections::VecDeque;

use anyhow::{Context, Result};
use futures::stream::Stream;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use url::Url;

/// Fixed page size for search requests (the API maximum).
pub const PER_PAGE: usize = 100;

// The search endpoint and the fixed header values every request carries
const SEARCH_URL: &str = "https://api.github.com/search/repositories";
const USER_AGENT_VALUE: &str = "gh-benford";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION_VALUE: &str = "2022-11-28";

// One repository as the search API reports it
//
// Only the four numeric attributes we tally are decoded; everything else in
// the response object is ignored. `id` must be present, the three counts
// default to 0 if the API ever omits them.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    /// Unique repository identifier
    pub id: i64,

    /// Star count (the API calls this stargazers_count)
    #[serde(rename = "stargazers_count", default)]
    pub stars: i64,

    /// Fork count
    #[serde(default)]
    pub forks: i64,

    /// Open issue count
    #[serde(rename = "open_issues", default)]
    pub open_issues: i64,
}

// One page of search results
//
// `items` is required on purpose: GitHub error bodies are valid JSON without
// it ({"message": ...}), and requiring the field turns those into decode
// errors instead of silently empty pages.
#[derive(Debug, Deserialize)]
struct SearchPage {
    items: Vec<RepoRecord>,
}

/// HTTP client for the repository search endpoint.
///
/// The access token is an explicit constructor argument and lives inside the
/// client's default headers, never in ambient state.
pub struct SearchClient {
    client: reqwest::Client,
}

impl SearchClient {
    /// Builds a client with the required headers installed as defaults.
    ///
    /// Headers sent on every request: bearer authorization, an identifying
    /// user agent, JSON content negotiation, and the pinned API version.
    /// Redirects are followed (reqwest's default policy); no timeout is
    /// configured beyond the client's defaults.
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("access token contains characters not allowed in a header")?;
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            API_VERSION_HEADER,
            HeaderValue::from_static(API_VERSION_VALUE),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }

    // Fetches one page of search results
    //
    // Prints a progress line (URL and status) to stdout for every request.
    // Non-2xx responses get their status and raw body echoed to stderr, and
    // the body is decoded regardless - see the module header for why.
    async fn fetch_page(&self, language: &str, page: u32) -> Result<Vec<RepoRecord>> {
        let url = page_url(language, page)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        println!("  📡 GET {} -> {}", url, status.as_u16());

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body for page {}", page))?;

        if !status.is_success() {
            eprintln!(
                "⚠️  Search API returned HTTP {} for page {}:",
                status.as_u16(),
                page
            );
            eprintln!("{}", body);
        }

        let decoded: SearchPage = serde_json::from_str(&body)
            .with_context(|| format!("failed to decode search response for page {}", page))?;

        Ok(decoded.items)
    }
}

// Builds the search URL for one page
//
// Url::parse_with_params percent-encodes the query values, so a language
// like "objective c" or "f#" ends up escaped correctly.
fn page_url(language: &str, page: u32) -> Result<Url> {
    Url::parse_with_params(
        SEARCH_URL,
        &[
            ("q", format!("language:{}", language)),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ],
    )
    .context("failed to build search URL")
}

// Pagination state threaded through the stream below
struct PageCursor<'a> {
    client: &'a SearchClient,
    language: String,
    next_page: u32,
    remaining: u64,
    // Set once a short page tells us the API has no further results
    exhausted: bool,
    buffer: VecDeque<RepoRecord>,
}

// Fetches the top repositories for a language as a lazy stream
//
// The stream yields up to `count` records in the search API's rank order,
// fetching one page at a time only when the consumer has drained the
// previous one. If the API runs out of results early the stream simply
// ends; the caller decides whether a short sample matters.
//
// Errors come through as stream items so the consumer can propagate them
// with `?`; after an Err the stream is finished.
pub fn fetch_top_repositories<'a>(
    client: &'a SearchClient,
    language: &str,
    count: u64,
) -> impl Stream<Item = Result<RepoRecord>> + 'a {
    let cursor = PageCursor {
        client,
        language: language.to_string(),
        next_page: 1,
        remaining: count,
        exhausted: false,
        buffer: VecDeque::new(),
    };

    futures::stream::unfold(cursor, |mut cursor| async move {
        loop {
            if cursor.remaining == 0 {
                return None;
            }

            // Hand out buffered records before touching the network again
            if let Some(record) = cursor.buffer.pop_front() {
                cursor.remaining -= 1;
                return Some((Ok(record), cursor));
            }

            if cursor.exhausted {
                return None;
            }

            let page = cursor.next_page;
            match cursor.client.fetch_page(&cursor.language, page).await {
                Ok(items) => {
                    // A short page means the API has nothing past it
                    if items.len() < PER_PAGE {
                        cursor.exhausted = true;
                    }
                    if items.is_empty() {
                        return None;
                    }
                    cursor.next_page += 1;
                    cursor.buffer.extend(items);
                }
                Err(err) => {
                    // Fatal: yield the error once, then end the stream
                    cursor.remaining = 0;
                    return Some((Err(err), cursor));
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_parameters() {
        let url = page_url("rust", 3).unwrap();
        assert_eq!(url.host_str(), Some("api.github.com"));
        assert_eq!(url.path(), "/search/repositories");

        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("q".to_string(), "language:rust".to_string())));
        assert!(query.contains(&("per_page".to_string(), "100".to_string())));
        assert!(query.contains(&("page".to_string(), "3".to_string())));
    }

    #[test]
    fn test_page_url_encodes_language() {
        let url = page_url("objective c", 1).unwrap();
        // The raw query string must not contain a bare space
        assert!(url.query().unwrap().contains("language%3Aobjective+c")
            || url.query().unwrap().contains("language%3Aobjective%20c"));
    }

    #[test]
    fn test_decode_search_page() {
        let body = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {"id": 724712, "stargazers_count": 93210, "forks": 12013, "open_issues": 9841, "name": "rust"},
                {"id": 19101, "stargazers_count": 411, "forks": 37, "open_issues": 5, "name": "tiny"}
            ]
        }"#;

        let page: SearchPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, 724712);
        assert_eq!(page.items[0].stars, 93210);
        assert_eq!(page.items[1].forks, 37);
        assert_eq!(page.items[1].open_issues, 5);
    }

    #[test]
    fn test_decode_defaults_missing_counts() {
        let body = r#"{"items": [{"id": 42}]}"#;

        let page: SearchPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.items[0].id, 42);
        assert_eq!(page.items[0].stars, 0);
        assert_eq!(page.items[0].forks, 0);
        assert_eq!(page.items[0].open_issues, 0);
    }

    #[test]
    fn test_decode_rejects_missing_id() {
        let body = r#"{"items": [{"stargazers_count": 10}]}"#;
        assert!(serde_json::from_str::<SearchPage>(body).is_err());
    }

    #[test]
    fn test_decode_rejects_error_body() {
        // What GitHub actually sends for a bad token: valid JSON, no items
        let body = r#"{"message": "Bad credentials", "status": "401"}"#;
        assert!(serde_json::from_str::<SearchPage>(body).is_err());
    }
}
