// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Normalize the requested repository count into [10, 1000]
// 3. Drain the paginated repository stream once, collecting the four
//    numeric series (id, stars, forks, open issues)
// 4. Tally leading digits per series and write the four chart pages
// 5. Print a digit summary and the elapsed time, exit with proper code
//    (0 = success, 1 = usage error, 2 = fatal error)
//
// Everything is strictly sequential: one page request at a time, one pass
// over the results, so the runtime is the current_thread flavor.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing and count normalization
mod digits; // src/digits.rs - leading-digit tallying
mod github; // src/github/ - search API client and pagination
mod report; // src/report/ - HTML chart rendering

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use futures::{pin_mut, Stream, StreamExt};

use cli::Cli;
use digits::{compute_leading_digit_frequencies, DigitFrequencyTable};
use github::{fetch_top_repositories, RepoRecord, SearchClient};

// The #[tokio::main] attribute transforms our async main into a real main
// function. current_thread keeps everything on one thread - there is never
// more than one request in flight.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Fatal error (transport failure, decode failure, file write):
            // print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// The main application logic
// Returns:
//   Ok(0) = reports written
//   Ok(1) = usage error, nothing fetched
//   Err   = fatal error (mapped to exit code 2 in main)
async fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            // clap renders --help and --version itself, exit code 0
            err.exit()
        }
        Err(_) => {
            eprintln!("Usage: gh-benford <access-token> <language> [<count>]");
            return Ok(1);
        }
    };

    let token = cli.token.trim();
    let language = cli.language.trim();

    let requested = cli::parse_count(cli.count.as_deref());
    let count = cli::clamp_count(requested);
    if count != requested {
        println!(
            "ℹ️  Requested count {} is outside {}..={}, using {}",
            requested,
            cli::MIN_COUNT,
            cli::MAX_COUNT,
            count
        );
    }

    println!(
        "🔍 Fetching the top {} {} repositories from the GitHub search API",
        count, language
    );

    let started = Instant::now();

    let client = SearchClient::new(token)?;
    let records = fetch_top_repositories(&client, language, count);
    let series = collect_series(records).await?;

    if (series.len() as u64) < count {
        // The API ran out of results before the requested count - not an
        // error, the charts just cover a smaller sample
        println!("⚠️  Search ran dry after {} repositories", series.len());
    }
    println!("✅ Collected {} repositories", series.len());

    write_reports(&series, count, language, Path::new("."))?;

    println!("⏱️  Finished in {:.2}s", started.elapsed().as_secs_f64());

    Ok(0)
}

// The four numeric series accumulated during the single pass over the
// fetched records. Records themselves are not retained - each one is
// split into its attributes and dropped.
#[derive(Debug, Default)]
struct AttributeSeries {
    ids: Vec<i64>,
    stars: Vec<i64>,
    forks: Vec<i64>,
    open_issues: Vec<i64>,
}

impl AttributeSeries {
    fn push(&mut self, record: &RepoRecord) {
        self.ids.push(record.id);
        self.stars.push(record.stars);
        self.forks.push(record.forks);
        self.open_issues.push(record.open_issues);
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

// Drains the record stream once, splitting each record into the four series
//
// The stream yields Results, so a transport or decode failure inside the
// fetcher surfaces here and aborts the run via `?`.
async fn collect_series<S>(records: S) -> Result<AttributeSeries>
where
    S: Stream<Item = Result<RepoRecord>>,
{
    pin_mut!(records);

    let mut series = AttributeSeries::default();
    while let Some(record) = records.next().await {
        series.push(&record?);
    }

    Ok(series)
}

// Tallies each series and writes the four chart pages into out_dir
//
// Output names are fixed; titles interpolate the attribute, the (clamped)
// repository count and the language.
fn write_reports(
    series: &AttributeSeries,
    count: u64,
    language: &str,
    out_dir: &Path,
) -> Result<()> {
    let reports: [(&str, &str, &Vec<i64>); 4] = [
        ("ids.html", "repository IDs", &series.ids),
        ("stars.html", "star counts", &series.stars),
        ("forks.html", "fork counts", &series.forks),
        ("issues.html", "open issue counts", &series.open_issues),
    ];

    for (file_name, attribute, values) in reports {
        let table = compute_leading_digit_frequencies(values.iter().copied());
        let title = format!(
            "Leading digits of {} for the top {} {} repositories",
            attribute, count, language
        );

        let destination = out_dir.join(file_name);
        report::render_digit_report(&table, &destination, &title)?;

        println!("📄 Wrote {}", destination.display());
        print_summary(attribute, &table);
    }

    Ok(())
}

// Prints a per-digit summary table for one attribute
//
// The BENFORD column shows the share the law predicts, so the four charts
// can be sanity-checked straight from the terminal.
fn print_summary(attribute: &str, table: &DigitFrequencyTable) {
    let total = table.total();

    println!("📊 Leading digits of {} ({} values tallied)", attribute, total);
    println!(
        "   {:<8} {:<8} {:<10} {:<10}",
        "DIGIT", "COUNT", "OBSERVED", "BENFORD"
    );

    for digit in 1..=9 {
        let observed = if total == 0 {
            0.0
        } else {
            table.count_for(digit) as f64 / total as f64
        };

        println!(
            "   {:<8} {:<8} {:<10} {:<10}",
            digit,
            table.count_for(digit),
            format!("{:.1}%", observed * 100.0),
            format!("{:.1}%", digits::benford_expected(digit) * 100.0)
        );
    }

    println!();
}
