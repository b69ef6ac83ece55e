//! Rendering difference reports.
//!
//! Text formats list one record per line in report order, followed by a
//! summary of counts by kind:
//!
//! ```text
//! • name: "DevEase" → "DevEase Pro"
//! + features[3]: "jwt"
//! - active: true
//! ~ a: 1 → [1] (number → array)
//!
//! Summary: 1 added, 1 removed, 1 changed, 1 type mismatch, 4 total
//! ```
//!
//! # Examples
//!
//! ```
//! use jcompare::{compare, format_report, parse_json, DiffOptions, OutputFormat, OutputOptions};
//!
//! let left = parse_json(r#"{"age": 30}"#).unwrap();
//! let right = parse_json(r#"{"age": 31}"#).unwrap();
//! let report = compare(&left, &right, &DiffOptions::default());
//!
//! let output = format_report(&report, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.starts_with("• age: 30 → 31"));
//! ```

use crate::diff::{DiffKind, DiffRecord, DiffReport, DiffStats, Path};
use crate::error::OutputError;
use crate::tree::{Node, Number};
use colored::*;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the report
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options for controlling text output.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Maximum characters per displayed value; 0 disables truncation
    pub max_value_length: usize,
    /// Append the summary line
    pub show_summary: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            max_value_length: 80,
            show_summary: true,
        }
    }
}

/// Formats a report in the requested format.
///
/// # Errors
///
/// Only the JSON format can fail, if a value cannot be serialized.
pub fn format_report(
    report: &DiffReport,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_listing(report, options, true)),
        OutputFormat::Plain => Ok(format_listing(report, options, false)),
        OutputFormat::Json => format_json(report),
    }
}

fn format_listing(report: &DiffReport, options: &OutputOptions, color: bool) -> String {
    if report.is_empty() {
        let message = "No differences found.";
        return if color {
            message.dimmed().to_string()
        } else {
            message.to_string()
        };
    }

    let lines: Vec<String> = report
        .iter()
        .map(|record| {
            if color {
                format_record_terminal(record, options.max_value_length)
            } else {
                format_record_plain(record, options.max_value_length)
            }
        })
        .collect();

    let mut output = lines.join("\n");
    if options.show_summary {
        output.push_str("\n\n");
        output.push_str(&format_summary(&report.stats));
    }
    output
}

/// Color scheme: green added, red removed, yellow changed, magenta type
/// mismatch.
fn format_record_terminal(record: &DiffRecord, max_len: usize) -> String {
    let path = display_path(&record.path);
    let left = display_value(record.left_value.as_ref(), max_len);
    let right = display_value(record.right_value.as_ref(), max_len);

    match record.kind {
        DiffKind::Added => format!("{} {}: {}", "+".bright_green(), path.green(), right.green()),
        DiffKind::Removed => format!("{} {}: {}", "-".bright_red(), path.red(), left.red()),
        DiffKind::Changed => format!(
            "{} {}: {} {} {}",
            "•".bright_yellow(),
            path.yellow(),
            left.yellow(),
            "→".bright_yellow(),
            right.yellow()
        ),
        DiffKind::TypeMismatch => format!(
            "{} {}: {} {} {} {}",
            "~".bright_magenta(),
            path.magenta(),
            left.magenta(),
            "→".bright_magenta(),
            right.magenta(),
            kind_change(record).dimmed()
        ),
    }
}

fn format_record_plain(record: &DiffRecord, max_len: usize) -> String {
    let path = display_path(&record.path);
    let left = display_value(record.left_value.as_ref(), max_len);
    let right = display_value(record.right_value.as_ref(), max_len);

    match record.kind {
        DiffKind::Added => format!("+ {path}: {right}"),
        DiffKind::Removed => format!("- {path}: {left}"),
        DiffKind::Changed => format!("• {path}: {left} → {right}"),
        DiffKind::TypeMismatch => {
            format!("~ {path}: {left} → {right} {}", kind_change(record))
        }
    }
}

/// `(number → array)` for a type mismatch record.
fn kind_change(record: &DiffRecord) -> String {
    format!(
        "({} → {})",
        kind_name(record.left_value.as_ref()),
        kind_name(record.right_value.as_ref())
    )
}

fn kind_name(value: Option<&Node>) -> &'static str {
    value.map_or("missing", Node::type_name)
}

fn display_path(path: &Path) -> String {
    if path.is_root() {
        "(root)".to_string()
    } else {
        path.to_string()
    }
}

fn display_value(value: Option<&Node>, max_len: usize) -> String {
    match value {
        Some(node) => node.preview(max_len),
        None => "—".to_string(),
    }
}

fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No differences".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }
    if stats.changed > 0 {
        parts.push(format!("{} changed", stats.changed));
    }
    match stats.type_mismatch {
        0 => {}
        1 => parts.push("1 type mismatch".to_string()),
        n => parts.push(format!("{n} type mismatches")),
    }
    parts.push(format!("{} total", stats.total()));

    format!("Summary: {}", parts.join(", "))
}

/// Pretty-printed JSON: `identical`, `differences` (absent sides omitted)
/// and `stats` with a `total`.
fn format_json(report: &DiffReport) -> Result<String, OutputError> {
    use serde_json::json;

    let differences: Vec<serde_json::Value> = report
        .iter()
        .map(|record| {
            let mut entry = serde_json::Map::new();
            entry.insert("path".to_string(), json!(record.path));
            entry.insert("type".to_string(), json!(record.kind));
            if let Some(left) = &record.left_value {
                entry.insert("left_value".to_string(), node_to_json_value(left));
            }
            if let Some(right) = &record.right_value {
                entry.insert("right_value".to_string(), node_to_json_value(right));
            }
            serde_json::Value::Object(entry)
        })
        .collect();

    let mut stats = serde_json::to_value(report.stats)
        .map_err(|source| OutputError::JsonSerializationError { source })?;
    if let serde_json::Value::Object(map) = &mut stats {
        map.insert("total".to_string(), json!(report.stats.total()));
    }

    let output = json!({
        "identical": report.is_empty(),
        "differences": differences,
        "stats": stats,
    });

    serde_json::to_string_pretty(&output)
        .map_err(|source| OutputError::JsonSerializationError { source })
}

/// Converts a Node to a serde_json::Value. JSON has no NaN or infinity, so
/// those become `null`.
fn node_to_json_value(node: &Node) -> serde_json::Value {
    match node {
        Node::Null => serde_json::Value::Null,
        Node::Bool(b) => serde_json::Value::Bool(*b),
        Node::Number(Number::Int(i)) => serde_json::Value::from(*i),
        Node::Number(Number::UInt(u)) => serde_json::Value::from(*u),
        Node::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Node::String(s) => serde_json::Value::String(s.clone()),
        Node::Array(items) => serde_json::Value::Array(items.iter().map(node_to_json_value).collect()),
        Node::Object(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), node_to_json_value(v)))
                .collect(),
        ),
    }
}
