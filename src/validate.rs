//! Document validation against a [`RuleSet`], and rule-set lint.
//!
//! Returns **all** errors, not just the first. Validation does not modify
//! either document.

use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::context::ValidationContext;
use crate::error::*;
use crate::path::{PathPattern, SEPARATOR, Segment, collect_located};
use crate::types::*;

// ─── Cached regexes ─────────────────────────────────────────────────────────

/// Key segments with brackets, e.g. `[0]`, `[*]`, `items[]`.
static BRACKET_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\[\]]").unwrap());

static PLAIN_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x21-\x7e]+$").unwrap());

/// Validate every value bound by `rules` in `target`, looking references up
/// in the context document.
///
/// With `context` set to `None`, every bound value yields a
/// [`FkErrorKind::NoContext`] error. Fields absent from `target` are not
/// checked, nor are bindings whose `fk` list is empty (see W-005).
pub fn validate(
    target: &Value,
    rules: &RuleSet,
    mut context: Option<&mut ValidationContext<'_>>,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut checked = 0usize;

    for binding in &rules.references {
        let Ok(rule) = binding.rule() else {
            warn!(field = %binding.field, "binding lists no fk patterns, skipped");
            continue;
        };
        for (location, value) in collect_located(&binding.field_pattern(), target) {
            checked += 1;
            if let Err(err) = rule.check(value, context.as_deref_mut()) {
                errors.push(ValidationError::from_fk_error(location.to_string(), &err));
            }
        }
    }

    debug!(
        bindings = rules.references.len(),
        checked,
        errors = errors.len(),
        traversals = context.as_ref().map(|c| c.cache().traversals()),
        "fk validation finished"
    );

    ValidationResult {
        errors,
        warnings: Vec::new(),
    }
}

/// Validate `document` against `rules`, using `document` itself as the
/// lookup context.
pub fn validate_self(document: &Value, rules: &RuleSet) -> ValidationResult {
    let mut context = ValidationContext::borrowed(document);
    validate(document, rules, Some(&mut context))
}

// ─── Lint ───────────────────────────────────────────────────────────────────

/// Warnings for patterns that parse but are probably not what the author
/// meant. Never produces errors.
pub fn lint(rules: &RuleSet) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();

    for (i, binding) in rules.references.iter().enumerate() {
        let field_path = format!("references[{}].field", i);
        let field = binding.field_pattern();
        w001_bracket_segments(&field, &field_path, &mut warnings);
        w002_stray_separators(&binding.field, &field_path, &mut warnings);
        w003_segment_chars(&field, &field_path, &mut warnings);

        if binding.fk.patterns().next().is_none() {
            warnings.push(warning(
                "W-005",
                format!("references[{}].fk", i),
                "fk lists no patterns; the binding is never checked".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (j, raw) in binding.fk.patterns().enumerate() {
            let fk_path = match &binding.fk {
                PathSpec::Single(_) => format!("references[{}].fk", i),
                PathSpec::Alternatives(_) => format!("references[{}].fk[{}]", i, j),
            };
            let pattern = PathPattern::parse(raw);
            w001_bracket_segments(&pattern, &fk_path, &mut warnings);
            w002_stray_separators(raw, &fk_path, &mut warnings);
            w003_segment_chars(&pattern, &fk_path, &mut warnings);
            if !seen.insert(pattern.clone()) {
                warnings.push(warning(
                    "W-004",
                    fk_path,
                    format!("pattern '{}' repeats an earlier alternative", pattern),
                ));
            }
        }
    }

    warnings
}

fn warning(code: &str, path: String, message: String) -> Diagnostic {
    Diagnostic {
        severity: DiagnosticSeverity::Warning,
        code: code.to_string(),
        path: Some(path),
        message,
    }
}

// ─── W-001 ──────────────────────────────────────────────────────────────────

fn w001_bracket_segments(pattern: &PathPattern, path: &str, warnings: &mut Vec<Diagnostic>) {
    for seg in pattern.segments() {
        if let Segment::Key(key) = seg
            && BRACKET_SEGMENT_RE.is_match(key)
        {
            warnings.push(warning(
                "W-001",
                path.to_string(),
                format!(
                    "segment '{}' is treated as a key name; use a separate '[]' segment to fan out over an array",
                    key
                ),
            ));
        }
    }
}

// ─── W-002 ──────────────────────────────────────────────────────────────────

fn w002_stray_separators(raw: &str, path: &str, warnings: &mut Vec<Diagnostic>) {
    if raw.is_empty() {
        return;
    }
    let has_empty_chunk = raw.split(SEPARATOR).any(|chunk| chunk.is_empty());
    if has_empty_chunk {
        warnings.push(warning(
            "W-002",
            path.to_string(),
            format!(
                "pattern '{}' has stray separators and is read as '{}'",
                raw,
                PathPattern::parse(raw)
            ),
        ));
    }
}

// ─── W-003 ──────────────────────────────────────────────────────────────────

fn w003_segment_chars(pattern: &PathPattern, path: &str, warnings: &mut Vec<Diagnostic>) {
    for seg in pattern.segments() {
        if let Segment::Key(key) = seg
            && !PLAIN_SEGMENT_RE.is_match(key)
        {
            warnings.push(warning(
                "W-003",
                path.to_string(),
                format!(
                    "segment '{}' contains whitespace or non-ASCII characters",
                    key
                ),
            ));
        }
    }
}
