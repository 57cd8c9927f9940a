// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The tool takes three positional arguments:
//   gh-benford <access-token> <language> [<count>]
//
// The count argument is deliberately forgiving: it is captured as a plain
// string so that a non-numeric value normalizes to 0 (and then clamps up to
// the minimum) instead of failing to parse.
// =============================================================================

use clap::Parser;

/// Smallest repository sample we will fetch.
pub const MIN_COUNT: u64 = 10;
/// Largest repository sample we will fetch (10 pages of 100).
pub const MAX_COUNT: u64 = 1000;
/// Sample size used when no count argument is given.
pub const DEFAULT_COUNT: u64 = 1000;

// This struct represents our entire CLI
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "gh-benford",
    version = "0.1.0",
    about = "Check GitHub repository statistics against Benford's Law",
    long_about = "gh-benford fetches the top repositories of a language from the GitHub \
                  search API, tallies the leading digit of their ids, stars, forks and \
                  open-issue counts, and writes four bar-chart HTML pages so you can \
                  eyeball the distributions against Benford's Law."
)]
pub struct Cli {
    /// GitHub access token, sent as a bearer credential on every request
    pub token: String,

    /// Language to search for (e.g. "rust", "python")
    pub language: String,

    /// How many top repositories to sample (clamped to 10..=1000, default 1000)
    ///
    /// Captured as a string on purpose: a value that isn't a number becomes 0
    /// and is then clamped up to the minimum rather than rejected.
    pub count: Option<String>,
}

// Resolves the optional count argument to a number
//
// Rules:
//   - absent         -> DEFAULT_COUNT (1000)
//   - "250"          -> 250
//   - "not-a-number" -> 0 (clamped up to MIN_COUNT later)
pub fn parse_count(raw: Option<&str>) -> u64 {
    match raw {
        Some(text) => text.trim().parse().unwrap_or(0),
        None => DEFAULT_COUNT,
    }
}

// Clamps a requested count into the supported [MIN_COUNT, MAX_COUNT] range
//
// The caller compares the result against the request to decide whether to
// print a clamping notice. Out-of-range values are normalized, never errors.
pub fn clamp_count(requested: u64) -> u64 {
    requested.clamp(MIN_COUNT, MAX_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_absent_defaults() {
        assert_eq!(parse_count(None), 1000);
    }

    #[test]
    fn test_parse_count_numeric() {
        assert_eq!(parse_count(Some("250")), 250);
        assert_eq!(parse_count(Some(" 42 ")), 42);
    }

    #[test]
    fn test_parse_count_non_numeric_is_zero() {
        assert_eq!(parse_count(Some("lots")), 0);
        assert_eq!(parse_count(Some("-5")), 0);
        assert_eq!(parse_count(Some("")), 0);
    }

    #[test]
    fn test_clamp_below_minimum() {
        assert_eq!(clamp_count(5), 10);
        assert_eq!(clamp_count(0), 10);
    }

    #[test]
    fn test_clamp_above_maximum() {
        assert_eq!(clamp_count(5000), 1000);
    }

    #[test]
    fn test_clamp_in_range_passthrough() {
        assert_eq!(clamp_count(10), 10);
        assert_eq!(clamp_count(333), 333);
        assert_eq!(clamp_count(1000), 1000);
    }
}
