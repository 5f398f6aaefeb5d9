use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::enums::BaseType;
use crate::error::EmptyPatternSet;
use crate::path::PathPattern;
use crate::rule::FkRule;

// ─── PathSpec ───────────────────────────────────────────────────────────────

/// Reference paths exactly as the schema author declared them.
///
/// Either a single pattern string or a non-empty list of alternative
/// patterns. Kept verbatim for diagnostics; evaluation goes through
/// [`PatternSet`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSpec {
    Single(String),
    Alternatives(Vec<String>),
}

impl PathSpec {
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            PathSpec::Single(s) => std::slice::from_ref(s),
            PathSpec::Alternatives(list) => list,
        };
        slice.iter().map(String::as_str)
    }

    pub fn pattern_set(&self) -> Result<PatternSet, EmptyPatternSet> {
        PatternSet::new(self.patterns().map(PathPattern::parse).collect())
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSpec::Single(s) => f.write_str(s),
            PathSpec::Alternatives(list) => f.write_str(&list.join(", ")),
        }
    }
}

impl From<&str> for PathSpec {
    fn from(s: &str) -> Self {
        PathSpec::Single(s.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for PathSpec {
    fn from(list: [&str; N]) -> Self {
        const { assert!(N > 0, "a reference needs at least one path pattern") };
        PathSpec::Alternatives(list.iter().map(|s| s.to_string()).collect())
    }
}

impl Serialize for PathSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSpec::Single(s) => s.serialize(serializer),
            PathSpec::Alternatives(list) => list.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PathSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(s) => Ok(PathSpec::Single(s)),
            Value::Array(items) => {
                if items.is_empty() {
                    return Err(serde::de::Error::custom(
                        "fk path list must contain at least one pattern",
                    ));
                }
                let list = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s),
                        other => Err(serde::de::Error::custom(format!(
                            "fk path list entries must be strings, got {}",
                            other
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PathSpec::Alternatives(list))
            }
            other => Err(serde::de::Error::custom(format!(
                "fk path must be a string or a list of strings, got {}",
                other
            ))),
        }
    }
}

// ─── PatternSet ─────────────────────────────────────────────────────────────

/// Ordered, non-empty alternatives evaluated with union semantics.
///
/// Two sets are equal (and share a cache entry) iff they hold the same
/// normalized patterns in the same order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternSet {
    patterns: Vec<PathPattern>,
}

impl PatternSet {
    /// # Errors
    ///
    /// [`EmptyPatternSet`] if `patterns` is empty.
    pub fn new(patterns: Vec<PathPattern>) -> Result<Self, EmptyPatternSet> {
        if patterns.is_empty() {
            return Err(EmptyPatternSet);
        }
        Ok(PatternSet { patterns })
    }

    pub fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }
}

impl From<PathPattern> for PatternSet {
    fn from(pattern: PathPattern) -> Self {
        PatternSet {
            patterns: vec![pattern],
        }
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.patterns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{}\"", p)?;
        }
        f.write_str("]")
    }
}

// ─── RuleSet ────────────────────────────────────────────────────────────────

/// Binds a foreign-key rule to every value found at `field`.
///
/// Patterns are kept as written so lint can see stray separators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Binding {
    pub field: String,
    #[serde(rename = "type", default)]
    pub base: BaseType,
    pub fk: PathSpec,
}

impl Binding {
    pub fn field_pattern(&self) -> PathPattern {
        PathPattern::parse(&self.field)
    }

    /// # Errors
    ///
    /// [`EmptyPatternSet`] if `fk` is an empty list. Deserialization already
    /// rejects that; bindings built in code may not.
    pub fn rule(&self) -> Result<FkRule, EmptyPatternSet> {
        FkRule::new(self.base, self.fk.clone())
    }
}

/// Top-level rule-set configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    #[serde(default)]
    pub references: Vec<Binding>,
}
