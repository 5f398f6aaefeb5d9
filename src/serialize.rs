//! [`ValidationResult`] → YAML report.

use crate::error::{SerializeError, ValidationResult};

/// Serialize a validation result to a YAML string.
///
/// Errors are emitted before warnings, each in the order it was produced.
pub fn serialize_report(result: &ValidationResult) -> Result<String, SerializeError> {
    // Convert to serde_json::Value first for consistent field ordering
    let value = serde_json::to_value(result).map_err(|e| SerializeError {
        message: format!("failed to convert report to JSON value: {}", e),
    })?;

    serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })
}
