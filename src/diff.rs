//! Structural comparison of two value trees.
//!
//! [`compare`] walks both trees depth-first and appends one [`DiffRecord`]
//! per difference, in traversal order:
//!
//! - object keys in union order: the left keys in left order, then the keys
//!   only the right side has, in right order;
//! - array elements by ascending index, or, with
//!   [`DiffOptions::ignore_array_order`], unmatched left elements followed
//!   by unmatched right elements, each at its original index.
//!
//! Nodes of different kinds produce a single `type_mismatch` record and are
//! not descended into. The walk uses an explicit stack and a single path
//! buffer that frames truncate and extend as they are popped, so deep
//! nesting neither consumes native stack nor copies paths per level.
//!
//! # Examples
//!
//! ```
//! use jcompare::{compare, parse_json, DiffKind, DiffOptions};
//!
//! let left = parse_json(r#"{"config": {"theme": "dark"}}"#).unwrap();
//! let right = parse_json(r#"{"config": {"theme": "light"}}"#).unwrap();
//!
//! let report = compare(&left, &right, &DiffOptions::default());
//!
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.records[0].kind, DiffKind::Changed);
//! assert_eq!(report.records[0].path.to_string(), "config.theme");
//! ```

use crate::encode::{CanonicalEncoder, ElementEncoder};
use crate::tree::Node;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, trace};

/// One step from a node to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Address of a position in a value tree.
///
/// Renders as `config.theme`, `features[2]` or `[0].name`; the root renders
/// as the empty string. Keys are written verbatim, and a key gets no
/// leading dot while nothing has been written before it, so `{"": {"x": 1}}`
/// addresses its leaf as `x`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the path of the object member `key` below this path.
    pub fn key(&self, key: &str) -> Path {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Path(segments)
    }

    /// Returns the path of the array element `index` below this path.
    pub fn index(&self, index: usize) -> Path {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Path(segments)
    }

    /// Moves to `step` below the ancestor holding the first `depth` segments.
    fn descend(&mut self, depth: usize, step: Option<Step<'_>>) {
        self.0.truncate(depth);
        match step {
            Some(Step::Key(key)) => self.0.push(PathSegment::Key(key.to_string())),
            Some(Step::Index(index)) => self.0.push(PathSegment::Index(index)),
            None => {}
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) => {
                    if written {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                    written |= !key.is_empty();
                }
                PathSegment::Index(index) => {
                    write!(f, "[{index}]")?;
                    written = true;
                }
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The kind of a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Key or index exists only on the right
    Added,
    /// Key or index exists only on the left
    Removed,
    /// Same kind on both sides, different value
    Changed,
    /// Different kinds on the two sides
    TypeMismatch,
}

impl DiffKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffKind::Added => "added",
            DiffKind::Removed => "removed",
            DiffKind::Changed => "changed",
            DiffKind::TypeMismatch => "type_mismatch",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single difference in the report.
///
/// `left_value` is `None` only for `Added` and `right_value` is `None` only
/// for `Removed`. A missing side means the key or index does not exist
/// there; a key holding `null` is present. The constructors keep this
/// invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffRecord {
    pub path: Path,
    pub kind: DiffKind,
    pub left_value: Option<Node>,
    pub right_value: Option<Node>,
}

impl DiffRecord {
    pub fn added(path: Path, right: Node) -> Self {
        Self {
            path,
            kind: DiffKind::Added,
            left_value: None,
            right_value: Some(right),
        }
    }

    pub fn removed(path: Path, left: Node) -> Self {
        Self {
            path,
            kind: DiffKind::Removed,
            left_value: Some(left),
            right_value: None,
        }
    }

    pub fn changed(path: Path, left: Node, right: Node) -> Self {
        Self {
            path,
            kind: DiffKind::Changed,
            left_value: Some(left),
            right_value: Some(right),
        }
    }

    pub fn type_mismatch(path: Path, left: Node, right: Node) -> Self {
        Self {
            path,
            kind: DiffKind::TypeMismatch,
            left_value: Some(left),
            right_value: Some(right),
        }
    }
}

/// Record counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub type_mismatch: usize,
}

impl DiffStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: DiffKind) {
        match kind {
            DiffKind::Added => self.added += 1,
            DiffKind::Removed => self.removed += 1,
            DiffKind::Changed => self.changed += 1,
            DiffKind::TypeMismatch => self.type_mismatch += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.changed + self.type_mismatch
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// The ordered result of one comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    /// Differences in traversal order
    pub records: Vec<DiffRecord>,
    pub stats: DiffStats,
}

impl DiffReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the two inputs are structurally identical.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffRecord> {
        self.records.iter()
    }
}

impl From<Vec<DiffRecord>> for DiffReport {
    fn from(records: Vec<DiffRecord>) -> Self {
        let mut stats = DiffStats::new();
        for record in &records {
            stats.record(record.kind);
        }
        Self { records, stats }
    }
}

impl<'a> IntoIterator for &'a DiffReport {
    type Item = &'a DiffRecord;
    type IntoIter = std::slice::Iter<'a, DiffRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Options for a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Compare arrays as multisets of whole elements instead of by index
    pub ignore_array_order: bool,
}

/// Compares two trees with the [`CanonicalEncoder`].
///
/// # Examples
///
/// ```
/// use jcompare::{compare, parse_json, DiffOptions};
///
/// let left = parse_json(r#"{"a": [1, 2]}"#).unwrap();
/// let right = parse_json(r#"{"a": [2, 1]}"#).unwrap();
///
/// assert_eq!(compare(&left, &right, &DiffOptions::default()).len(), 2);
///
/// let unordered = DiffOptions { ignore_array_order: true };
/// assert!(compare(&left, &right, &unordered).is_empty());
/// ```
pub fn compare(left: &Node, right: &Node, options: &DiffOptions) -> DiffReport {
    Differ::new(*options).compare(left, right)
}

/// A configured comparator. The encoder only matters for
/// order-insensitive array comparison.
#[derive(Debug, Clone)]
pub struct Differ<E = CanonicalEncoder> {
    options: DiffOptions,
    encoder: E,
}

impl Differ<CanonicalEncoder> {
    pub fn new(options: DiffOptions) -> Self {
        Self {
            options,
            encoder: CanonicalEncoder,
        }
    }
}

/// The last segment of a frame's path, borrowed from the input.
#[derive(Clone, Copy)]
enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Pending work for the traversal. `depth` is the length of the parent's
/// path; `step` is `None` only for the root.
struct Frame<'a> {
    depth: usize,
    step: Option<Step<'a>>,
    work: Work<'a>,
}

enum Work<'a> {
    Pair { left: &'a Node, right: &'a Node },
    Added(&'a Node),
    Removed(&'a Node),
}

impl<'a> Frame<'a> {
    fn child(depth: usize, step: Step<'a>, work: Work<'a>) -> Self {
        Self {
            depth,
            step: Some(step),
            work,
        }
    }
}

impl<E: ElementEncoder> Differ<E> {
    pub fn with_encoder(options: DiffOptions, encoder: E) -> Self {
        Self { options, encoder }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compares `left` against `right`. Never fails; an empty report means
    /// the trees are identical under the configured options.
    pub fn compare(&self, left: &Node, right: &Node) -> DiffReport {
        let mut records = Vec::new();
        let mut path = Path::root();
        let mut stack = vec![Frame {
            depth: 0,
            step: None,
            work: Work::Pair { left, right },
        }];

        while let Some(frame) = stack.pop() {
            path.descend(frame.depth, frame.step);
            match frame.work {
                Work::Added(right) => {
                    records.push(DiffRecord::added(path.clone(), right.clone()));
                }
                Work::Removed(left) => {
                    records.push(DiffRecord::removed(path.clone(), left.clone()));
                }
                Work::Pair { left, right } => {
                    self.compare_pair(left, right, &path, &mut stack, &mut records);
                }
            }
        }

        let report = DiffReport::from(records);
        debug!(
            differences = report.len(),
            ignore_array_order = self.options.ignore_array_order,
            "comparison complete"
        );
        report
    }

    fn compare_pair<'a>(
        &self,
        left: &'a Node,
        right: &'a Node,
        path: &Path,
        stack: &mut Vec<Frame<'a>>,
        records: &mut Vec<DiffRecord>,
    ) {
        let depth = path.segments().len();
        match (left, right) {
            (Node::Object(left_entries), Node::Object(right_entries)) => {
                push_object_frames(left_entries, right_entries, depth, stack);
            }
            (Node::Array(left_items), Node::Array(right_items)) => {
                if self.options.ignore_array_order {
                    self.diff_unordered(left_items, right_items, path, records);
                } else {
                    push_array_frames(left_items, right_items, depth, stack);
                }
            }
            _ if left.kind() != right.kind() => {
                records.push(DiffRecord::type_mismatch(
                    path.clone(),
                    left.clone(),
                    right.clone(),
                ));
            }
            _ => {
                if !primitives_equal(left, right) {
                    records.push(DiffRecord::changed(path.clone(), left.clone(), right.clone()));
                }
            }
        }
    }

    /// Matches elements by encoding, consuming one counterpart per match so
    /// duplicates count. Unmatched elements are reported at their own index.
    fn diff_unordered(
        &self,
        left: &[Node],
        right: &[Node],
        path: &Path,
        records: &mut Vec<DiffRecord>,
    ) {
        let left_keys: Vec<String> = left.iter().map(|n| self.encoder.encode(n)).collect();
        let right_keys: Vec<String> = right.iter().map(|n| self.encoder.encode(n)).collect();

        let mut available = multiset(&right_keys);
        for (index, (node, key)) in left.iter().zip(&left_keys).enumerate() {
            if !take(&mut available, key) {
                records.push(DiffRecord::removed(path.index(index), node.clone()));
            }
        }

        let mut available = multiset(&left_keys);
        for (index, (node, key)) in right.iter().zip(&right_keys).enumerate() {
            if !take(&mut available, key) {
                records.push(DiffRecord::added(path.index(index), node.clone()));
            }
        }

        trace!(
            path = %path,
            left = left.len(),
            right = right.len(),
            "compared array as multiset"
        );
    }
}

fn push_object_frames<'a>(
    left: &'a [(String, Node)],
    right: &'a [(String, Node)],
    depth: usize,
    stack: &mut Vec<Frame<'a>>,
) {
    let right_index: HashMap<&str, &Node> = right.iter().map(|(k, v)| (k.as_str(), v)).collect();
    let left_keys: HashSet<&str> = left.iter().map(|(k, _)| k.as_str()).collect();

    let mut frames = Vec::with_capacity(left.len() + right.len());
    for (key, left_value) in left {
        let work = match right_index.get(key.as_str()).copied() {
            Some(right_value) => Work::Pair {
                left: left_value,
                right: right_value,
            },
            None => Work::Removed(left_value),
        };
        frames.push(Frame::child(depth, Step::Key(key), work));
    }
    for (key, right_value) in right {
        if !left_keys.contains(key.as_str()) {
            frames.push(Frame::child(depth, Step::Key(key), Work::Added(right_value)));
        }
    }

    // Reversed so the first key is popped first.
    stack.extend(frames.into_iter().rev());
}

fn push_array_frames<'a>(
    left: &'a [Node],
    right: &'a [Node],
    depth: usize,
    stack: &mut Vec<Frame<'a>>,
) {
    let len = left.len().max(right.len());
    for i in (0..len).rev() {
        let work = match (left.get(i), right.get(i)) {
            (Some(left), Some(right)) => Work::Pair { left, right },
            (Some(left), None) => Work::Removed(left),
            (None, Some(right)) => Work::Added(right),
            (None, None) => continue,
        };
        stack.push(Frame::child(depth, Step::Index(i), work));
    }
}

/// Same-kind leaf comparison. Numbers follow the equality rule of
/// [`Number`](crate::tree::Number).
fn primitives_equal(left: &Node, right: &Node) -> bool {
    match (left, right) {
        (Node::Null, Node::Null) => true,
        (Node::Bool(a), Node::Bool(b)) => a == b,
        (Node::Number(a), Node::Number(b)) => a == b,
        (Node::String(a), Node::String(b)) => a == b,
        _ => false,
    }
}

fn multiset(keys: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key.as_str()).or_insert(0) += 1;
    }
    counts
}

fn take(counts: &mut HashMap<&str, usize>, key: &str) -> bool {
    match counts.get_mut(key) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    }
}
