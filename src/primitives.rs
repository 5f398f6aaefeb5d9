//! Value equality shared by the path evaluator and the lookup cache.
//!
//! Both sides must agree exactly: a value found by [`matches`](crate::path::matches)
//! must also be found by [`CandidateSet::contains`](crate::cache::CandidateSet::contains)
//! and the other way round.

use serde_json::{Number, Value};

/// Equality without type coercion.
///
/// Different JSON types never compare equal (`1` vs `"1"`, `true` vs `1`,
/// `null` vs `""`). Numbers compare by numeric value, so integer 42 equals
/// float 42.0. Object key order is irrelevant; arrays compare element-wise.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => NumberKey::of(a) == NumberKey::of(b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            if a.len() != b.len() {
                return false;
            }
            a.iter()
                .all(|(k, v)| b.get(k).is_some_and(|bv| values_equal(v, bv)))
        }
        _ => false,
    }
}

/// Hashable identity of a JSON number under [`values_equal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum NumberKey {
    Int(i128),
    /// Bit pattern of a non-integral float.
    Float(u64),
}

/// Floats at or beyond this magnitude are kept as floats; `f64 as i128`
/// would saturate.
const INTEGRAL_FLOAT_LIMIT: f64 = 1.0e38;

impl NumberKey {
    pub(crate) fn of(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return NumberKey::Int(i as i128);
        }
        if let Some(u) = n.as_u64() {
            return NumberKey::Int(u as i128);
        }
        let f = n.as_f64().unwrap_or(f64::NAN);
        if f.fract() == 0.0 && f.abs() < INTEGRAL_FLOAT_LIMIT {
            // -0.0 lands on Int(0) here as well.
            NumberKey::Int(f as i128)
        } else {
            NumberKey::Float(f.to_bits())
        }
    }
}

/// Hashable identity of a scalar JSON value under [`values_equal`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ScalarKey {
    Null,
    Bool(bool),
    Number(NumberKey),
    String(String),
}

impl ScalarKey {
    /// Returns `None` for arrays and objects.
    pub(crate) fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(ScalarKey::Null),
            Value::Bool(b) => Some(ScalarKey::Bool(*b)),
            Value::Number(n) => Some(ScalarKey::Number(NumberKey::of(n))),
            Value::String(s) => Some(ScalarKey::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}
