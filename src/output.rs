//! CLI output formatting.
//!
//! After a run the CLI prints a short report: what was indexed, what was
//! filtered, and where the index went.
//!
//! ```text
//! Summary
//!     Source: book
//!     Chapters: 3
//!     Pages: 5
//!     Filtered: 5 files
//!     Output: book/SUMMARY.md
//! ```
//!
//! A dry run prints the rendered index first, followed by the same report with
//! `Output: dry run, nothing written`.
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` for testability and has a
//! `print_*` wrapper that writes to stdout. Format functions are pure, no I/O.
//! Diagnostics go through `tracing` to stderr and never mix with this output.

use crate::generate::Report;
use crate::walk::INDENT_UNIT;

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Format the run report.
pub fn format_report(report: &Report) -> Vec<String> {
    let mut lines = vec!["Summary".to_string()];
    let ctx = INDENT_UNIT;

    lines.push(format!("{ctx}Source: {}", report.root.display()));
    if !report.has_root_cover {
        lines.push(format!("{ctx}Cover: missing"));
    }
    lines.push(format!("{ctx}Chapters: {}", report.chapters));
    lines.push(format!("{ctx}Pages: {}", report.pages));
    if !report.filtered.is_empty() {
        lines.push(format!(
            "{ctx}Filtered: {}",
            plural(report.filtered.len(), "file", "files")
        ));
    }
    match &report.summary_path {
        Some(path) => lines.push(format!("{ctx}Output: {}", path.display())),
        None => lines.push(format!("{ctx}Output: dry run, nothing written")),
    }
    if let Some(path) = &report.manifest_path {
        lines.push(format!("{ctx}Manifest: {}", path.display()));
    }
    lines
}

/// Format the rendered index, one line per entry, header included.
pub fn format_index(report: &Report) -> Vec<String> {
    report.document.render().lines().map(String::from).collect()
}

pub fn print_report(report: &Report) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

pub fn print_index(report: &Report) {
    for line in format_index(report) {
        println!("{}", line);
    }
    println!();
}
