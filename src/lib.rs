//! Foreign-key reference checks for nested JSON/YAML documents.
//!
//! A foreign-key rule asserts that a field's value also occurs somewhere else
//! in the same document, at a location described by one or more dotted path
//! patterns (`makes.[].id`, `makes.[].alternateIds.[]`). This crate provides
//! the pieces a schema-validation host needs to offer such a rule:
//!
//! ```text
//! PathPattern ── matches / collect ──► values in the document
//! PatternSet  ── LookupCache::resolve ──► CandidateSet (one walk per run)
//! FkRule::check(value, context) ──► Ok(()) | FkError::{NotFound, NoContext}
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use fkref::{FkRule, ValidationContext};
//! use serde_json::json;
//!
//! let data = json!({
//!     "makes": [
//!         { "id": "nissan", "alternateIds": ["datsun"] },
//!         { "id": "toyota" }
//!     ]
//! });
//!
//! let rule = FkRule::string(["makes.[].id", "makes.[].alternateIds.[]"])?;
//! let mut context = ValidationContext::borrowed(&data);
//!
//! assert!(rule.check(&json!("datsun"), Some(&mut context)).is_ok());
//! assert!(rule.check(&json!("ford"), Some(&mut context)).is_err());
//! assert_eq!(context.cache().traversals(), 1);
//! # Ok::<(), fkref::EmptyPatternSet>(())
//! ```

pub mod cache;
pub mod context;
pub mod enums;
pub mod error;
pub mod parse;
pub mod path;
pub mod primitives;
pub mod rule;
pub mod serialize;
pub mod types;
pub mod validate;

pub use cache::{CandidateSet, LookupCache, SharedLookupCache};
pub use context::ValidationContext;
pub use enums::BaseType;
pub use error::*;
pub use path::PathPattern;
pub use rule::FkRule;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use parse::{parse_document, parse_rules};
pub use serialize::serialize_report;
pub use validate::{lint, validate, validate_self};

/// Convenience entry point composing parse → lint → validate.
///
/// The document is validated against the rule set with itself as the lookup
/// context. Lint warnings are attached to the result.
///
/// # Errors
///
/// Returns `Err(Vec<FkrefError>)` if the document or the rule set fails to
/// parse. Both are attempted so that both failures are reported.
///
/// # Example
///
/// ```rust
/// let document = r#"
/// species:
///   - speciesId: 1
///   - speciesId: 2
/// animals:
///   - name: bob
///     speciesId: 11
/// "#;
/// let rules = r#"
/// references:
///   - field: animals.[].speciesId
///     type: number
///     fk: species.[].speciesId
/// "#;
///
/// let result = fkref::check(document, rules).expect("both inputs parse");
/// assert_eq!(result.errors.len(), 1);
/// assert_eq!(result.errors[0].path, "animals[0].speciesId");
/// assert_eq!(result.errors[0].code, "number.fk_not_found");
/// ```
pub fn check(document: &str, rules: &str) -> Result<ValidationResult, Vec<FkrefError>> {
    let document = parse::parse_document(document).map_err(FkrefError::Document);
    let rules = parse::parse_rules(rules).map_err(FkrefError::Rules);

    let (document, rules) = match (document, rules) {
        (Ok(d), Ok(r)) => (d, r),
        (d, r) => {
            return Err(d.err().into_iter().chain(r.err()).collect());
        }
    };

    let mut result = validate::validate_self(&document, &rules);
    result.warnings = validate::lint(&rules);
    Ok(result)
}
