//! Output formatting module
//!
//! Handles:
//! - Human-readable per-entry validation tables
//! - The cross-VLAN matrix view
//! - JSON output of entries and summary
//! - Run summary statistics

use anyhow::Result;
use std::fmt::Write;

use crate::models::{RunSummary, ValidationEntry, ValidationOutput};

pub mod matrix;

pub use matrix::{build_matrix, render_matrix, VlanMatrix};

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Table of one entry's path results
pub fn format_entry(index: usize, entry: &ValidationEntry) -> String {
    let mut out = String::new();
    let vlan = entry.vlan();

    let _ = writeln!(out, "Entry #{}: VLAN {} - {}", index + 1, vlan, entry.epg_name);
    let _ = writeln!(
        out,
        "  {} Allowed, {} Not Allowed",
        entry.allowed_count(),
        entry.not_allowed_count()
    );

    let allowed_header = format!("VLAN {} Allowed", vlan);
    let path_width = entry
        .results
        .iter()
        .map(|r| r.path.len())
        .chain(["Path".len()])
        .max()
        .unwrap_or(4);
    let allowed_width = allowed_header.len();

    let _ = writeln!(
        out,
        "  {:<path_width$}  {:<15}  {:<allowed_width$}  Status",
        "Path", "Active Endpoint", allowed_header
    );
    for result in &entry.results {
        let _ = writeln!(
            out,
            "  {:<path_width$}  {:<15}  {:<allowed_width$}  {}",
            result.path,
            yes_no(result.has_active_endpoint),
            yes_no(result.is_vlan_allowed),
            result.status
        );
    }
    out
}

/// Summary block printed after the tables
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Validation Summary:");
    let _ = writeln!(out, "  Path attachments: {}", summary.attachments);
    let _ = writeln!(out, "  Entries validated: {}", summary.entries);
    if summary.skipped_entries > 0 {
        let _ = writeln!(out, "  Entries skipped: {}", summary.skipped_entries);
    }
    let _ = writeln!(out, "  Paths checked: {}", summary.paths_checked);
    let _ = writeln!(out, "  Allowed: {}", summary.allowed);
    let _ = writeln!(out, "  Not allowed: {}", summary.not_allowed);
    out
}

/// Full human-readable report
pub fn format_human(output: &ValidationOutput, with_matrix: bool) -> String {
    let mut out = String::new();

    if output.entries.is_empty() {
        out.push_str("No entries could be validated.\n\n");
    } else {
        for (index, entry) in output.entries.iter().enumerate() {
            out.push_str(&format_entry(index, entry));
            out.push('\n');
        }
    }

    if with_matrix {
        let matrix = render_matrix(&build_matrix(&output.entries));
        if !matrix.is_empty() {
            out.push_str(&matrix);
            out.push('\n');
        }
    }

    out.push_str(&format_summary(&output.summary));
    out
}

pub fn format_json(output: &ValidationOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}
