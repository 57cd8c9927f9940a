// src/report/html.rs
// =============================================================================
// This module turns a digit-frequency table into a self-contained HTML page.
//
// The page embeds:
// - The Chart.js bundle from a CDN (the only external reference)
// - A canvas plus a script block that feeds Chart.js the nine labels
//   ("1".."9") and their counts, in ascending digit order
//
// Escaping:
// - The title appears twice as HTML text content, so it is HTML-escaped
// - The title also appears inside the script block as the dataset label,
//   so it is separately encoded as a JSON string literal with '<' escaped
//   (otherwise a title containing "</script>" could end the block early)
//
// The destination file is overwritten unconditionally; a failed write is a
// fatal error for the whole run.
// =============================================================================

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::digits::DigitFrequencyTable;

// Pinned chart library build referenced by every generated page
const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

// Renders a digit-frequency bar chart to an HTML file
//
// Parameters:
//   table: the nine digit counts to plot
//   destination: where to write the page (existing files are overwritten)
//   title: human-readable chart title
pub fn render_digit_report(
    table: &DigitFrequencyTable,
    destination: &Path,
    title: &str,
) -> Result<()> {
    let document = build_document(table, title);

    fs::write(destination, document)
        .with_context(|| format!("failed to write report to {}", destination.display()))?;

    Ok(())
}

// Builds the full HTML document as a string
fn build_document(table: &DigitFrequencyTable, title: &str) -> String {
    let title_text = html_escape(title);
    let title_literal = js_string_literal(title);
    let labels_json = js_string_array(&DigitFrequencyTable::labels());
    let counts_json = js_number_array(&table.counts());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title_text}</title>
    <script src="{cdn}"></script>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            color: #333;
            margin: 0;
            padding: 0;
            background-color: #f5f5f5;
        }}
        .container {{
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background-color: white;
            box-shadow: 0 0 10px rgba(0,0,0,0.1);
            min-height: 100vh;
        }}
        h1 {{
            color: #2c3e50;
            font-size: 1.4em;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{title_text}</h1>
        <canvas id="digit-chart"></canvas>
    </div>
    <script>
        const labels = {labels_json};
        const counts = {counts_json};
        new Chart(document.getElementById("digit-chart"), {{
            type: "bar",
            data: {{
                labels: labels,
                datasets: [{{
                    label: {title_literal},
                    data: counts,
                    backgroundColor: "rgba(52, 152, 219, 0.6)",
                    borderColor: "rgba(52, 152, 219, 1.0)",
                    borderWidth: 1
                }}]
            }},
            options: {{
                scales: {{
                    x: {{ title: {{ display: true, text: "Leading digit" }} }},
                    y: {{ beginAtZero: true, title: {{ display: true, text: "Occurrences" }} }}
                }}
            }}
        }});
    </script>
</body>
</html>
"#,
        title_text = title_text,
        cdn = CHART_JS_CDN,
        title_literal = title_literal,
        labels_json = labels_json,
        counts_json = counts_json,
    )
}

// Escapes a string for use as HTML text content
fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// Encodes a string as a JavaScript string literal safe to embed in a
// <script> block
//
// JSON string encoding handles quotes, backslashes and control characters;
// the extra '<' escape keeps "</script>" from terminating the block.
fn js_string_literal(text: &str) -> String {
    serde_json::to_string(text)
        .expect("encoding a string as JSON cannot fail")
        .replace('<', "\\u003c")
}

// Encodes the label array as a JSON array of strings
fn js_string_array(labels: &[String]) -> String {
    serde_json::to_string(labels).expect("encoding strings as JSON cannot fail")
}

// Encodes the count array as a JSON array of numbers
fn js_number_array(counts: &[u64]) -> String {
    serde_json::to_string(counts).expect("encoding numbers as JSON cannot fail")
}
