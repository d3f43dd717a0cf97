//! Validation error types and JSON error format.

use crate::messages::MessageCatalog;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Declared name of the field that failed
    pub field: String,
    /// Display label used when rendering the message
    pub label: String,
    /// The failing rule (e.g. "required", "min", "email")
    pub rule: String,
    /// Raw rule parameter, empty when the rule has none
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub param: String,
    /// The field's raw value at validation time
    pub value: serde_json::Value,
    /// Rendered human-readable message
    pub message: String,
}

impl ValidationError {
    /// Build an error, rendering its message from `catalog`.
    pub fn render(
        catalog: &MessageCatalog,
        field: impl Into<String>,
        label: impl Into<String>,
        rule: impl Into<String>,
        param: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        let (label, rule, param) = (label.into(), rule.into(), param.into());
        let message = catalog.render(&rule, &label, &param);
        Self {
            field: field.into(),
            label,
            rule,
            param,
            value,
            message,
        }
    }

    /// This error with its message rendered from another catalog.
    pub fn rerender(&self, catalog: &MessageCatalog) -> Self {
        Self {
            message: catalog.render(&self.rule, &self.label, &self.param),
            ..self.clone()
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Ordered collection of field failures, at most one per field.
///
/// A successful validation is reported as `Ok(())`; this type only ever
/// reaches callers with at least one entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The first failure in declaration order.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// The failure reported for a field, by declared name.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Iterate over errors in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// All rendered messages, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Names of the failing fields, in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Borrow the errors as a slice.
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `Ok(())` if empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Re-render every message from another catalog.
    pub fn localize(&self, catalog: &MessageCatalog) -> Self {
        Self {
            errors: self.errors.iter().map(|e| e.rerender(catalog)).collect(),
        }
    }

    /// Convert to the standard API error envelope.
    pub fn to_api_error(&self) -> ApiValidationError {
        ApiValidationError {
            error: ErrorBody {
                error_type: "validation_error".to_string(),
                message: self
                    .first()
                    .map_or_else(|| "Validation failed".to_string(), |e| e.message.clone()),
                fields: self
                    .errors
                    .iter()
                    .map(|e| FieldErrorResponse {
                        field: e.label.clone(),
                        code: e.rule.clone(),
                        message: e.message.clone(),
                    })
                    .collect(),
            },
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(first) => f.write_str(&first.message),
            None => f.write_str("validation failed"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// API response format for validation errors.
///
/// ```json
/// {
///   "error": {
///     "type": "validation_error",
///     "message": "Username must be at least 3",
///     "fields": [{"field": "Username", "code": "min", "message": "..."}]
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiValidationError {
    pub error: ErrorBody,
}

/// Error body in API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    pub fields: Vec<FieldErrorResponse>,
}

/// Single field error in API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Errors returned by the validator's fallible entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was not a structured record.
    #[error("validator: expected a record, got {found}")]
    NotARecord { found: &'static str },

    /// One or more fields failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// Validator configuration could not be parsed.
    #[error("invalid validator configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// The field failures, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ValidationErrors {
        let catalog = MessageCatalog::english();
        [
            ValidationError::render(&catalog, "username", "Username", "min", "3", json!("ab")),
            ValidationError::render(&catalog, "email", "Email", "email", "", json!("x")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn error_creation_renders_message() {
        let errors = sample();
        let first = errors.first().unwrap();
        assert_eq!(first.field, "username");
        assert_eq!(first.rule, "min");
        assert_eq!(first.value, json!("ab"));
        assert_eq!(first.message, "Username must be at least 3");
    }

    #[test]
    fn display_is_first_message() {
        let errors = sample();
        assert_eq!(errors.to_string(), "Username must be at least 3");
        assert_eq!(ValidationErrors::new().to_string(), "validation failed");
    }

    #[test]
    fn accessors() {
        let errors = sample();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.field_names(), vec!["username", "email"]);
        assert_eq!(
            errors.messages(),
            vec!["Username must be at least 3", "Email must be a valid email address"]
        );
        assert_eq!(errors.get("email").map(|e| e.rule.as_str()), Some("email"));
        assert!(errors.get("password").is_none());
    }

    #[test]
    fn into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(sample().into_result().is_err());
    }

    #[test]
    fn serializes_as_list() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json[0]["field"], "username");
        assert_eq!(json[0]["param"], "3");
        assert!(json[1].get("param").is_none());
    }

    #[test]
    fn api_error_envelope() {
        let api = serde_json::to_value(sample().to_api_error()).unwrap();
        assert_eq!(api["error"]["type"], "validation_error");
        assert_eq!(api["error"]["message"], "Username must be at least 3");
        assert_eq!(api["error"]["fields"][1]["code"], "email");
        assert_eq!(api["error"]["fields"][1]["field"], "Email");
    }

    #[test]
    fn localize_rerenders_with_label_and_param() {
        let zh = sample().localize(&MessageCatalog::chinese());
        assert_eq!(zh.messages(), vec!["Username长度不能小于3", "Email必须是有效的邮箱地址"]);
        assert_eq!(zh.first().map(|e| e.rule.as_str()), Some("min"));
    }

    #[test]
    fn not_a_record_display() {
        let err = Error::NotARecord { found: "array" };
        assert_eq!(err.to_string(), "validator: expected a record, got array");
        assert!(err.validation_errors().is_none());
        assert!(Error::from(sample()).validation_errors().is_some());
    }
}
