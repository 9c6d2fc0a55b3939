use std::time::Duration;

use crate::args::OutputFormat;
use crate::error::AppResult;

use super::status::{group_by_category, status_description};
use super::types::Report;

/// Milliseconds per second.
const MS_PER_SEC: u128 = 1_000;

#[must_use]
pub fn banner_lines(url: &str, requests: usize, concurrency: usize) -> Vec<String> {
    vec![
        format!("Starting load test against {}", url),
        format!("Total requests: {}", requests),
        format!("Concurrency: {}", concurrency),
        String::new(),
    ]
}

pub fn print_banner(url: &str, requests: usize, concurrency: usize) {
    for line in banner_lines(url, requests, concurrency) {
        println!("{}", line);
    }
}

#[must_use]
pub fn report_lines(report: &Report) -> Vec<String> {
    let mut lines = vec![
        "Results:".to_owned(),
        format!("Total time: {}", format_elapsed(report.total_time)),
        format!("Total requests: {}", report.total_requests),
        String::new(),
        "Status code distribution:".to_owned(),
    ];

    for group in group_by_category(&report.status_codes) {
        lines.push(String::new());
        lines.push(format!("{}:", group.category.label()));
        for (code, count) in group.codes {
            lines.push(format!(
                "  HTTP {} ({}): {} requests",
                code,
                status_description(code),
                count
            ));
        }
    }

    if report.errors > 0 {
        lines.push(String::new());
        lines.push(format!("Failed requests: {}", report.errors));
    }

    lines
}

/// Serialises the report as a single pretty-printed JSON document.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub fn render_json(report: &Report, url: &str, concurrency: usize) -> AppResult<String> {
    let status_codes: Vec<serde_json::Value> = group_by_category(&report.status_codes)
        .into_iter()
        .flat_map(|group| {
            group.codes.into_iter().map(move |(code, count)| {
                serde_json::json!({
                    "code": code,
                    "category": group.category.as_str(),
                    "description": status_description(code),
                    "count": count
                })
            })
        })
        .collect();

    let payload = serde_json::json!({
        "url": url,
        "concurrency": concurrency,
        "total_time_ms": report.total_time.as_millis(),
        "total_requests": report.total_requests,
        "completed_requests": report.completed(),
        "errors": report.errors,
        "status_codes": status_codes
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Writes the final report to stdout in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub fn print_report(
    report: &Report,
    format: OutputFormat,
    url: &str,
    concurrency: usize,
) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            for line in report_lines(report) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", render_json(report, url, concurrency)?);
        }
    }
    Ok(())
}

/// Seconds with millisecond precision.
pub(super) fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let whole = millis.checked_div(MS_PER_SEC).unwrap_or(0);
    let thousandths = millis.checked_rem(MS_PER_SEC).unwrap_or(0);
    format!("{}.{:03}s", whole, thousandths)
}
