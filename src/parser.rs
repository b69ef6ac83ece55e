//! Parsing JSON, YAML and TOML text into [`Node`] trees.
//!
//! Object key order is kept as written, since it decides the order of a
//! difference report. Numbers keep the integer/float distinction.
//!
//! # Examples
//!
//! ```no_run
//! use jcompare::parser::{parse_file, FormatHint};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let left = parse_file(Path::new("left.json"), FormatHint::Auto)?;
//! let right = parse_file(Path::new("right.yaml"), FormatHint::Auto)?;
//! # Ok(())
//! # }
//! ```

use crate::error::ParseError;
use crate::tree::{Node, Number};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Which syntax to expect from an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatHint {
    /// Decide by file extension, else try JSON and then YAML
    #[default]
    Auto,
    Json,
    Yaml,
    Toml,
}

/// Parses a file into a Node.
///
/// With [`FormatHint::Auto`] the extension decides (`.json`, `.yaml`/`.yml`,
/// `.toml`); unknown extensions fall back to content detection.
///
/// # Errors
///
/// - `ParseError::FileNotFound` if the path does not exist
/// - `ParseError::ReadError` if it cannot be read
/// - `ParseError::EmptyInput` if it holds only whitespace
/// - `ParseError::JsonError`, `YamlError` or `TomlError` for invalid content
/// - `ParseError::UnknownFormat` if content detection fails
pub fn parse_file(path: &Path, hint: FormatHint) -> Result<Node, ParseError> {
    let source = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(ParseError::file_not_found(source));
    }

    let content = fs::read_to_string(path).map_err(|e| ParseError::read_error(&source, e))?;

    let hint = match hint {
        FormatHint::Auto => hint_from_extension(path),
        explicit => explicit,
    };

    parse_content(&content, hint, &source)
}

/// Reads standard input to the end and parses it.
pub fn parse_stdin(hint: FormatHint) -> Result<Node, ParseError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|source| ParseError::StdinError { source })?;
    parse_content(&content, hint, "<stdin>")
}

/// Parses text in the given format. `source` names the input in errors.
///
/// # Examples
///
/// ```
/// use jcompare::parser::{parse_content, FormatHint};
///
/// let node = parse_content("name: Alice", FormatHint::Auto, "inline").unwrap();
/// assert_eq!(node.get("name").unwrap().to_string(), "\"Alice\"");
///
/// assert!(parse_content("   ", FormatHint::Json, "inline").is_err());
/// ```
pub fn parse_content(content: &str, hint: FormatHint, source: &str) -> Result<Node, ParseError> {
    if content.trim().is_empty() {
        return Err(ParseError::empty_input(source));
    }

    let node = match hint {
        FormatHint::Json => parse_json(content).map_err(|e| ParseError::json_error(source, e))?,
        FormatHint::Yaml => parse_yaml(content).map_err(|e| ParseError::yaml_error(source, e))?,
        FormatHint::Toml => parse_toml(content).map_err(|e| ParseError::toml_error(source, e))?,
        FormatHint::Auto => detect(content, source)?,
    };

    debug!(source, kind = node.type_name(), "parsed input");
    Ok(node)
}

/// Content that opens like a JSON document must be valid JSON; anything
/// else is tried as JSON and then as YAML.
fn detect(content: &str, source: &str) -> Result<Node, ParseError> {
    match parse_json(content) {
        Ok(node) => Ok(node),
        Err(e) if looks_like_json(content) => Err(ParseError::json_error(source, e)),
        Err(_) => parse_yaml(content).map_err(|_| ParseError::unknown_format(source)),
    }
}

fn looks_like_json(content: &str) -> bool {
    matches!(content.trim_start().chars().next(), Some('{') | Some('['))
}

/// Parses a JSON string into a Node.
///
/// ```
/// use jcompare::parser::parse_json;
///
/// let node = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert_eq!(node.to_string(), r#"{"name":"Alice","age":30}"#);
/// ```
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(json_to_node(value))
}

/// Parses a YAML string into a Node.
pub fn parse_yaml(content: &str) -> Result<Node, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_node(value))
}

/// Parses a TOML document into a Node. The root is always an object.
pub fn parse_toml(content: &str) -> Result<Node, toml::de::Error> {
    let value: toml::Value = toml::from_str(content)?;
    Ok(toml_to_node(value))
}

fn hint_from_extension(path: &Path) -> FormatHint {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("json") => FormatHint::Json,
        Some("yaml") | Some("yml") => FormatHint::Yaml,
        Some("toml") => FormatHint::Toml,
        _ => FormatHint::Auto,
    }
}

fn json_to_node(value: serde_json::Value) -> Node {
    match value {
        serde_json::Value::Null => Node::Null,
        serde_json::Value::Bool(b) => Node::Bool(b),
        serde_json::Value::Number(n) => Node::Number(json_number(&n)),
        serde_json::Value::String(s) => Node::String(s),
        serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(json_to_node).collect()),
        serde_json::Value::Object(obj) => {
            Node::Object(obj.into_iter().map(|(k, v)| (k, json_to_node(v))).collect())
        }
    }
}

fn json_number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Int(i)
    } else if let Some(u) = n.as_u64() {
        Number::UInt(u)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// YAML anchors and merge keys are already resolved by serde_yaml. Tags are
/// dropped in favor of the tagged value, and non-string keys are turned into
/// strings.
fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::Number(Number::Int(i))
            } else if let Some(u) = n.as_u64() {
                Node::Number(Number::UInt(u))
            } else {
                Node::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        serde_yaml::Value::String(s) => Node::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Node::Array(seq.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(map) => Node::object(map.into_iter().map(|(k, v)| {
            let key = match k {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Null => "null".to_string(),
                other => yaml_to_node(other).to_string(),
            };
            (key, yaml_to_node(v))
        })),
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(tagged.value),
    }
}

fn toml_to_node(value: toml::Value) -> Node {
    match value {
        toml::Value::String(s) => Node::String(s),
        toml::Value::Integer(i) => Node::Number(Number::Int(i)),
        toml::Value::Float(f) => Node::Number(Number::Float(f)),
        toml::Value::Boolean(b) => Node::Bool(b),
        toml::Value::Datetime(dt) => Node::String(dt.to_string()),
        toml::Value::Array(arr) => Node::Array(arr.into_iter().map(toml_to_node).collect()),
        toml::Value::Table(table) => {
            Node::Object(table.into_iter().map(|(k, v)| (k, toml_to_node(v))).collect())
        }
    }
}
