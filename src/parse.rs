use serde_json::Value;

use crate::error::{ParseError, ParseErrorKind};
use crate::types::RuleSet;

/// Parse YAML (or JSON, which is a YAML subset) into a document tree.
///
/// Performs deserialization only; the tree is not validated.
pub fn parse_document(input: &str) -> Result<Value, ParseError> {
    if input.trim().is_empty() {
        return Err(syntax_error("empty input".to_string(), None));
    }

    check_multi_document(input)?;

    // Untyped target: any failure here is malformed YAML.
    serde_saphyr::from_str(input).map_err(|e| syntax_error(e.to_string(), None))
}

/// Parse a rule-set configuration.
///
/// ```yaml
/// references:
///   - field: vehicles.[].makeId
///     fk: [makes.[].id, makes.[].alternateIds.[]]
/// ```
pub fn parse_rules(input: &str) -> Result<RuleSet, ParseError> {
    let value = parse_document(input)?;

    if !value.is_object() {
        return Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: "rule set root must be a mapping".to_string(),
            path: None,
            line: None,
        });
    }

    serde_json::from_value(value).map_err(|e| {
        let msg = e.to_string();
        ParseError {
            kind: classify_json_error(&msg),
            message: msg,
            path: None,
            line: None,
        }
    })
}

fn syntax_error(message: String, line: Option<usize>) -> ParseError {
    ParseError {
        kind: ParseErrorKind::Syntax,
        message,
        path: None,
        line,
    }
}

/// Check for multiple YAML documents (--- separator).
/// Only matches `---` at column 0 to avoid false positives inside block scalars.
fn check_multi_document(input: &str) -> Result<(), ParseError> {
    let mut doc_count = 0;
    for (line_num, line) in input.lines().enumerate() {
        if line.starts_with("---") && line[3..].trim().is_empty() {
            doc_count += 1;
            if doc_count > 1 {
                return Err(syntax_error(
                    "multi-document YAML is not supported".to_string(),
                    Some(line_num + 1),
                ));
            }
        }
    }
    Ok(())
}

fn classify_json_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown field") {
        ParseErrorKind::UnknownField
    } else {
        ParseErrorKind::TypeMismatch
    }
}
