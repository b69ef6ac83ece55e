//! Element encoders for order-insensitive array comparison.
//!
//! When arrays are compared as multisets, each element is reduced to a
//! string and elements are matched by string equality. The encoder decides
//! which values count as "the same element".

use crate::tree::{write_json_string, Node, Number};
use std::fmt::{self, Write as _};

/// Turns a node into a string used only for equality and membership tests.
///
/// Implementations must be deterministic: equal input gives equal output for
/// the lifetime of the process.
pub trait ElementEncoder {
    fn encode(&self, node: &Node) -> String;
}

impl<E: ElementEncoder + ?Sized> ElementEncoder for &E {
    fn encode(&self, node: &Node) -> String {
        (**self).encode(node)
    }
}

/// Compact JSON with object keys sorted and numbers normalized.
///
/// Two nodes encode to the same string exactly when the differ would report
/// no difference between them, so `{"a":1,"b":2}` and `{"b":2,"a":1.0}`
/// encode identically.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalEncoder;

impl ElementEncoder for CanonicalEncoder {
    fn encode(&self, node: &Node) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_node(&mut out, node, true);
        out
    }
}

/// Compact JSON with object keys left in insertion order.
///
/// Objects holding the same entries in a different order are distinct
/// elements under this encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionOrderEncoder;

impl ElementEncoder for InsertionOrderEncoder {
    fn encode(&self, node: &Node) -> String {
        let mut out = String::new();
        let _ = write_node(&mut out, node, false);
        out
    }
}

fn write_node(out: &mut String, node: &Node, sort_keys: bool) -> fmt::Result {
    match node {
        Node::Null => out.write_str("null"),
        Node::Bool(b) => write!(out, "{b}"),
        Node::Number(n) => write_number(out, *n),
        Node::String(s) => write_json_string(out, s),
        Node::Array(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_node(out, item, sort_keys)?;
            }
            out.write_char(']')
        }
        Node::Object(entries) => {
            let mut entries: Vec<&(String, Node)> = entries.iter().collect();
            if sort_keys {
                entries.sort_by(|a, b| a.0.cmp(&b.0));
            }

            out.write_char('{')?;
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_json_string(out, key)?;
                out.write_char(':')?;
                write_node(out, value, sort_keys)?;
            }
            out.write_char('}')
        }
    }
}

/// Integral values share one spelling whatever their source type, so `1`,
/// `1.0` and `-0.0`/`0` collapse. Other floats use the shortest
/// round-tripping form, which is unique per value.
fn write_number(out: &mut String, n: Number) -> fmt::Result {
    match n.as_exact_integer() {
        Some(i) => write!(out, "{i}"),
        None => write!(out, "{n}"),
    }
}
