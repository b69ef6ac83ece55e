//! jcompare - structural comparison of JSON documents.
//!
//! Two value trees are compared key by key and index by index, and every
//! difference is reported with the path where it occurs. Arrays can also be
//! compared as multisets when element order does not matter.
//!
//! # Example
//!
//! ```no_run
//! use jcompare::{compare, format_report, parse_file, DiffOptions, FormatHint, OutputFormat, OutputOptions};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let left = parse_file(Path::new("left.json"), FormatHint::Auto)?;
//! let right = parse_file(Path::new("right.json"), FormatHint::Auto)?;
//!
//! let report = compare(&left, &right, &DiffOptions { ignore_array_order: true });
//!
//! let output = format_report(&report, &OutputFormat::Terminal, &OutputOptions::default())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod encode;
pub mod error;
pub mod output;
pub mod parser;
pub mod tree;

pub use diff::{
    compare, DiffKind, DiffOptions, DiffRecord, DiffReport, DiffStats, Differ, Path, PathSegment,
};
pub use encode::{CanonicalEncoder, ElementEncoder, InsertionOrderEncoder};
pub use error::{JcompareError, OutputError, ParseError};
pub use output::{format_report, OutputFormat, OutputOptions};
pub use parser::{
    parse_content, parse_file, parse_json, parse_stdin, parse_toml, parse_yaml, FormatHint,
};
pub use tree::{Node, NodeKind, Number};
