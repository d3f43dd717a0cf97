//! Validation of dynamic JSON payloads.
//!
//! ```rust,ignore
//! use tagval::{FieldRules, Validator};
//!
//! let rules = FieldRules::new()
//!     .field("email", "required,email")
//!     .labeled("age", "Age", "gte=18");
//!
//! Validator::new().validate_json(&payload, &rules)?;
//! ```

use crate::error::Error;
use crate::record::{Entry, Field, Record};
use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

static NULL: Json = Json::Null;

/// Annotation for one key of a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Object key
    pub field: String,
    /// Rule annotation
    pub rules: String,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Ordered annotations for the keys of a JSON object.
///
/// Keys are checked in the order they were declared. A key missing from
/// the payload is validated as `null`, so only `required` rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRules {
    rules: Vec<FieldRule>,
}

impl FieldRules {
    /// No annotations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotate a key.
    pub fn field(self, field: impl Into<String>, rules: impl Into<String>) -> Self {
        self.push(FieldRule {
            field: field.into(),
            rules: rules.into(),
            label: None,
        })
    }

    /// Annotate a key with a display label.
    pub fn labeled(
        self,
        field: impl Into<String>,
        label: impl Into<String>,
        rules: impl Into<String>,
    ) -> Self {
        self.push(FieldRule {
            field: field.into(),
            rules: rules.into(),
            label: Some(label.into()),
        })
    }

    /// Append an annotation.
    pub fn push(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Iterate over annotations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldRule> {
        self.rules.iter()
    }

    /// Number of annotated keys.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no key is annotated.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<FieldRule> for FieldRules {
    fn from_iter<I: IntoIterator<Item = FieldRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, R: Into<String>> FromIterator<(K, R)> for FieldRules {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(field, rules)| FieldRule {
                field: field.into(),
                rules: rules.into(),
                label: None,
            })
            .collect()
    }
}

struct JsonRecord<'a> {
    object: &'a Map<String, Json>,
    rules: &'a FieldRules,
}

impl Record for JsonRecord<'_> {
    fn entries(&self) -> Vec<Entry<'_>> {
        self.rules
            .iter()
            .map(|rule| {
                let value = self.object.get(&rule.field).unwrap_or(&NULL);
                let field = Field::new(&rule.field, &rule.rules, value);
                Entry::Field(match &rule.label {
                    Some(label) => field.label(label),
                    None => field,
                })
            })
            .collect()
    }
}

fn kind_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

impl Validator {
    /// Validate a JSON object against per-key annotations.
    ///
    /// Anything other than an object fails with [`Error::NotARecord`];
    /// field failures are returned as [`Error::Invalid`].
    pub fn validate_json(&self, value: &Json, rules: &FieldRules) -> Result<(), Error> {
        let Json::Object(object) = value else {
            let found = kind_name(value);
            trace_debug!(found, "rejected non-object JSON payload");
            return Err(Error::NotARecord { found });
        };
        self.validate(&JsonRecord { object, rules })?;
        Ok(())
    }
}

/// Validate a JSON object with the default validator.
pub fn validate_json(value: &Json, rules: &FieldRules) -> Result<(), Error> {
    crate::validator::default_validator().validate_json(value, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signup_rules() -> FieldRules {
        FieldRules::new()
            .labeled("username", "Username", "required,username,range=3-16")
            .field("email", "required,email")
            .field("age", "gte=18")
            .field("tags", "max=3")
    }

    #[test]
    fn valid_payload_passes() {
        let payload = json!({
            "username": "alice_01",
            "email": "alice@example.com",
            "age": 30,
            "tags": ["a", "b"],
            "extra": "ignored"
        });
        assert!(Validator::new().validate_json(&payload, &signup_rules()).is_ok());
    }

    #[test]
    fn missing_keys_only_fail_required() {
        let payload = json!({ "username": "alice" });
        let err = Validator::new()
            .validate_json(&payload, &signup_rules())
            .unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.field_names(), vec!["email"]);
        assert_eq!(errors.first().map(|e| e.value.clone()), Some(Json::Null));
    }

    #[test]
    fn field_failures_in_declaration_order() {
        let payload = json!({
            "username": "a!",
            "email": "nope",
            "age": 12,
            "tags": ["a", "b", "c", "d"]
        });
        let err = Validator::new()
            .validate_json(&payload, &signup_rules())
            .unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.field_names(), vec!["username", "email", "age", "tags"]);
        assert_eq!(
            errors.first().map(|e| e.message.as_str()),
            Some("Username may only contain letters, digits and underscores")
        );
    }

    #[test]
    fn non_object_is_not_a_record() {
        let validator = Validator::new();
        for (value, found) in [
            (json!(null), "null"),
            (json!(true), "bool"),
            (json!(1), "number"),
            (json!("s"), "string"),
            (json!([1, 2]), "array"),
        ] {
            let err = validator.validate_json(&value, &signup_rules()).unwrap_err();
            assert!(matches!(err, Error::NotARecord { found: f } if f == found));
        }
    }

    #[test]
    fn rules_deserialize_from_a_list() {
        let rules: FieldRules = serde_json::from_value(json!([
            { "field": "name", "rules": "required", "label": "Name" },
            { "field": "code", "rules": "len=4" }
        ]))
        .unwrap();
        assert_eq!(rules.len(), 2);
        let err = Validator::new()
            .validate_json(&json!({ "code": "abc" }), &rules)
            .unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().messages(),
            vec!["Name is required", "code must have length 4"]
        );
    }

    #[test]
    fn rules_collect_from_pairs() {
        let rules: FieldRules = [("id", "required"), ("kind", "oneof=a b")].into_iter().collect();
        assert_eq!(rules.len(), 2);
        assert!(Validator::new()
            .validate_json(&json!({ "id": 7, "kind": "b" }), &rules)
            .is_ok());
    }
}
