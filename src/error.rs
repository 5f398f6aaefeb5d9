use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::enums::BaseType;
use crate::types::PathSpec;

/// Diagnostic severity level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A structured diagnostic message produced while linting a rule set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
    UnknownField,
}

/// Produced by `parse_document` and `parse_rules` when deserialization fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// The two ways a foreign-key check can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FkErrorKind {
    /// The caller never supplied a run context holding the lookup document.
    NoContext,
    /// The value was not reachable through any declared pattern.
    FkNotFound,
}

impl FkErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FkErrorKind::NoContext => "no_context",
            FkErrorKind::FkNotFound => "fk_not_found",
        }
    }
}

/// Failure returned by [`FkRule::check`](crate::rule::FkRule::check).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FkError {
    #[error("the document to look for references in must be supplied in the validation context")]
    NoContext { base: BaseType },

    #[error(
        "\"{}\" could not be found as a reference to \"{}\"",
        display_value(.value),
        .path
    )]
    NotFound {
        base: BaseType,
        value: Value,
        path: PathSpec,
    },
}

impl FkError {
    pub fn kind(&self) -> FkErrorKind {
        match self {
            FkError::NoContext { .. } => FkErrorKind::NoContext,
            FkError::NotFound { .. } => FkErrorKind::FkNotFound,
        }
    }

    /// Stable error code, e.g. `string.fk_not_found` or `number.no_context`.
    pub fn code(&self) -> String {
        let base = match self {
            FkError::NoContext { base } | FkError::NotFound { base, .. } => base,
        };
        format!("{}.{}", base.as_str(), self.kind().as_str())
    }
}

/// A rule or pattern set was built from an empty list of patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("a reference needs at least one path pattern")]
pub struct EmptyPatternSet;

/// Strings render bare; everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A located failure produced by `validate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: String,
    pub kind: FkErrorKind,
    /// Concrete location of the checked value in the validation target.
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationError {
    pub fn from_fk_error(path: String, err: &FkError) -> Self {
        let value = match err {
            FkError::NotFound { value, .. } => Some(value.clone()),
            FkError::NoContext { .. } => None,
        };
        ValidationError {
            code: err.code(),
            kind: err.kind(),
            path,
            message: err.to_string(),
            value,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.path, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Result of validation: errors and warnings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// True if any error is a missing-context configuration failure.
    pub fn is_misconfigured(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.kind == FkErrorKind::NoContext)
    }
}

/// Serialization error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SerializeError {
    pub message: String,
}

/// Combined error type for the [`check`](crate::check) entry point.
#[derive(Clone, Debug, Error)]
pub enum FkrefError {
    #[error("Document parse error: {0}")]
    Document(ParseError),
    #[error("Rule set parse error: {0}")]
    Rules(ParseError),
}
