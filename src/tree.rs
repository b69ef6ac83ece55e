//! Value tree for JSON-compatible data.
//!
//! Every parser in this crate produces a [`Node`], and the differ only ever
//! sees `Node`s. Objects keep their keys in insertion order because the
//! order of a difference report depends on it.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

/// 2^127, the first magnitude an `f64` can hold that no `i128` can.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// A JSON number that remembers whether it was written as an integer.
///
/// Equality compares mathematical values: integers exactly (also beyond
/// 2^53), an integral float equal to the integer it denotes, and floats
/// with SameValueZero semantics (`NaN == NaN`, `-0.0 == 0.0`).
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// Returns the exact integer this number denotes, if it denotes one.
    ///
    /// Floats qualify when they are integral and fit in an `i128`, so
    /// `3.0` yields `Some(3)` and `-0.0` yields `Some(0)`.
    pub fn as_exact_integer(self) -> Option<i128> {
        match self {
            Number::Int(i) => Some(i128::from(i)),
            Number::UInt(u) => Some(i128::from(u)),
            Number::Float(f) => {
                if f.fract() == 0.0 && (-I128_BOUND..I128_BOUND).contains(&f) {
                    Some(f as i128)
                } else {
                    None
                }
            }
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_exact_integer(), other.as_exact_integer()) {
            (Some(a), Some(b)) => a == b,
            _ => match (*self, *other) {
                (Number::Float(a), Number::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
                _ => false,
            },
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{i}"),
            Number::UInt(u) => write!(f, "{u}"),
            Number::Float(x) if x.is_nan() => f.write_str("NaN"),
            Number::Float(x) if x.is_infinite() => {
                f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

/// The kind of a node. Two nodes of different kinds are never compared
/// value by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node representing a value in structured data (JSON, YAML, TOML).
///
/// `Object` holds key/value pairs in insertion order with unique keys. Use
/// [`Node::object`] to build one from pairs that may repeat a key.
///
/// The derived `PartialEq` is structural and sensitive to object key order;
/// use the differ for order-independent comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl Node {
    /// Builds an object from pairs. A repeated key keeps the position of its
    /// first occurrence and the value of its last.
    pub fn object<K, I>(pairs: I) -> Node
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        let mut entries: Vec<(String, Node)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (key, value) in pairs {
            let key = key.into();
            match positions.get(&key) {
                Some(&at) => entries[at].1 = value,
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, value));
                }
            }
        }
        Node::Object(entries)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Looks up `key` when this node is an object.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the compact JSON rendering, cut to `max_len` characters
    /// (including a trailing `...`). A `max_len` of zero never truncates.
    pub fn preview(&self, max_len: usize) -> String {
        let rendered = self.to_string();
        if max_len == 0 || rendered.chars().count() <= max_len {
            return rendered;
        }

        let mut preview: String = rendered.chars().take(max_len.saturating_sub(3)).collect();
        preview.push_str("...");
        preview
    }
}

/// Compact JSON text. Non-finite floats are written as `NaN`, `Infinity`
/// and `-Infinity`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Bool(b) => write!(f, "{b}"),
            Node::Number(n) => write!(f, "{n}"),
            Node::String(s) => write_json_string(f, s),
            Node::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Node::Object(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_json_string(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

/// Writes `s` as a quoted JSON string literal.
pub(crate) fn write_json_string<W: fmt::Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{08}' => out.write_str("\\b")?,
            '\u{0c}' => out.write_str("\\f")?,
            c if u32::from(c) < 0x20 => write!(out, "\\u{:04x}", u32::from(c))?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Number(Number::Int(i64::from(value)))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(Number::Int(value))
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Node::Number(Number::UInt(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(Number::Float(value))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Array(value)
    }
}
