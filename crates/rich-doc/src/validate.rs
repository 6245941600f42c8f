//! Save-time checks on editor output.

use ecow::EcoString;
use serde_json::Value;

use crate::ast::Node;
use crate::error::{Error, Result};
use crate::text::extract_text;

/// Outcome of [`validate`]. `valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    /// Whether the document may be saved.
    pub valid: bool,
    /// One message per violated rule, in rule order.
    pub errors: Vec<EcoString>,
}

impl Validation {
    fn from_errors(errors: Vec<EcoString>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Converts into a `Result`, so callers can use `?`.
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(Error::Invalid(self.errors))
        }
    }
}

/// Checks that `value` is a saveable document.
///
/// Rules after the first are accumulated, so a single call reports every
/// problem. Never panics.
///
/// ```rust
/// use rich_doc::validate;
/// use serde_json::json;
///
/// let report = validate(&json!({ "type": "paragraph" }));
/// assert!(!report.valid);
/// assert_eq!(report.errors[0], r#"Root node must be of type "doc""#);
/// ```
pub fn validate(value: &Value) -> Validation {
    let obj = match value {
        Value::Null | Value::Bool(false) => {
            return Validation::from_errors(vec!["Content is empty".into()]);
        }
        Value::String(s) if s.is_empty() => {
            return Validation::from_errors(vec!["Content is empty".into()]);
        }
        Value::Object(obj) => obj,
        _ => {
            return Validation::from_errors(vec!["Content must be a valid JSON object".into()]);
        }
    };

    let mut errors = Vec::new();
    if obj.get("type").and_then(Value::as_str) != Some("doc") {
        errors.push(r#"Root node must be of type "doc""#.into());
    }
    if !obj.get("content").is_some_and(Value::is_array) {
        errors.push(r#"Content must have a "content" array"#.into());
    }
    if extract_text(&Node::from_value(value)).trim().is_empty() {
        errors.push("Content cannot be empty".into());
    }

    if !errors.is_empty() {
        log::debug!("document rejected: {errors:?}");
    }
    Validation::from_errors(errors)
}
