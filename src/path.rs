//! Dotted path patterns and their evaluation against a document tree.
//!
//! A pattern is a list of `.`-separated segments. A segment is either a key
//! name, which descends into a mapping, or the literal `[]`, which fans out
//! over every element of a sequence. The empty pattern denotes the root.
//!
//! ```text
//! makes.[].models.[].id   key, fan-out, key, fan-out, key
//! makes.[].alternateIds.[]   ends on a fan-out: the array elements themselves
//! ```
//!
//! Evaluation never fails: a segment that does not fit the shape of the
//! current subtree (missing key, key on a scalar, `[]` on a mapping) simply
//! contributes no match.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::primitives::values_equal;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// The literal segment denoting "every element of the array here".
pub const WILDCARD: &str = "[]";

/// One step of a [`PathPattern`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Each,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Each => f.write_str(WILDCARD),
        }
    }
}

/// A parsed path pattern.
///
/// Parsing is total: empty segments left by leading, trailing, or repeated
/// separators are dropped, so `""`, `"."` and `".."` all parse to the root
/// pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// The zero-segment pattern addressing the document itself.
    pub fn root() -> Self {
        PathPattern::default()
    }

    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split(SEPARATOR)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                if chunk == WILDCARD {
                    Segment::Each
                } else {
                    Segment::Key(chunk.to_string())
                }
            })
            .collect();
        PathPattern { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if at least one segment fans out over an array.
    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Each))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl FromStr for PathPattern {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PathPattern::parse(s))
    }
}

impl From<&str> for PathPattern {
    fn from(s: &str) -> Self {
        PathPattern::parse(s)
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PathPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PathPattern::parse(&s))
    }
}

// ─── Existence check ────────────────────────────────────────────────────────

/// Returns true iff `value` occurs at some location `pattern` describes
/// within `document`.
///
/// Stops at the first match; no intermediate collection is built.
pub fn matches(value: &Value, pattern: &PathPattern, document: &Value) -> bool {
    matches_segments(value, pattern.segments(), document)
}

fn matches_segments(value: &Value, segments: &[Segment], node: &Value) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        return values_equal(node, value);
    };
    match head {
        Segment::Each => match node.as_array() {
            Some(items) => items.iter().any(|item| matches_segments(value, rest, item)),
            None => false,
        },
        Segment::Key(key) => match node.as_object().and_then(|obj| obj.get(key)) {
            Some(child) => matches_segments(value, rest, child),
            None => false,
        },
    }
}

// ─── Collection ─────────────────────────────────────────────────────────────

/// Returns every value reachable through `pattern` in traversal order.
///
/// The root pattern yields the document itself as a single-element list.
pub fn collect<'a>(pattern: &PathPattern, document: &'a Value) -> Vec<&'a Value> {
    let mut out = Vec::new();
    collect_into(pattern.segments(), document, &mut out);
    out
}

fn collect_into<'a>(segments: &[Segment], node: &'a Value, out: &mut Vec<&'a Value>) {
    let Some((head, rest)) = segments.split_first() else {
        out.push(node);
        return;
    };
    match head {
        Segment::Each => {
            if let Some(items) = node.as_array() {
                for item in items {
                    collect_into(rest, item, out);
                }
            }
        }
        Segment::Key(key) => {
            if let Some(child) = node.as_object().and_then(|obj| obj.get(key)) {
                collect_into(rest, child, out);
            }
        }
    }
}

// ─── Located collection ─────────────────────────────────────────────────────

/// One step of a concrete [`Location`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Key(String),
    Index(usize),
}

/// A concrete position inside a document, e.g. `vehicles[0].makeId`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    steps: Vec<Step>,
}

impl Location {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn child(&self, step: Step) -> Location {
        let mut steps = self.steps.clone();
        steps.push(step);
        Location { steps }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("$");
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Key(k) if i == 0 => write!(f, "{}", k)?,
                Step::Key(k) => write!(f, ".{}", k)?,
                Step::Index(n) => write!(f, "[{}]", n)?,
            }
        }
        Ok(())
    }
}

/// Like [`collect`], but also reports where each value was found.
pub fn collect_located<'a>(
    pattern: &PathPattern,
    document: &'a Value,
) -> Vec<(Location, &'a Value)> {
    let mut out = Vec::new();
    collect_located_into(pattern.segments(), document, Location::default(), &mut out);
    out
}

fn collect_located_into<'a>(
    segments: &[Segment],
    node: &'a Value,
    here: Location,
    out: &mut Vec<(Location, &'a Value)>,
) {
    let Some((head, rest)) = segments.split_first() else {
        out.push((here, node));
        return;
    };
    match head {
        Segment::Each => {
            if let Some(items) = node.as_array() {
                for (i, item) in items.iter().enumerate() {
                    collect_located_into(rest, item, here.child(Step::Index(i)), out);
                }
            }
        }
        Segment::Key(key) => {
            if let Some(child) = node.as_object().and_then(|obj| obj.get(key)) {
                collect_located_into(rest, child, here.child(Step::Key(key.clone())), out);
            }
        }
    }
}
