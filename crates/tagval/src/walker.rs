//! Record traversal.

use crate::error::{ValidationError, ValidationErrors};
use crate::grammar;
use crate::messages::MessageCatalog;
use crate::record::{Entry, Field, Record};
use crate::rules::RuleTable;

/// Walks records against a rule table and message catalog.
pub(crate) struct Walker<'v> {
    pub(crate) rules: &'v RuleTable,
    pub(crate) messages: &'v MessageCatalog,
}

impl Walker<'_> {
    /// Validate every entry of `record`, flattening embedded records.
    pub(crate) fn walk(&self, record: &dyn Record, errors: &mut ValidationErrors) {
        for entry in record.entries() {
            match entry {
                Entry::Field(field) => {
                    if let Some(error) = self.check_field(&field) {
                        errors.push(error);
                    }
                }
                Entry::Embedded(inner) => self.walk(inner, errors),
            }
        }
    }

    /// The first failing rule of a field, as an error.
    pub(crate) fn check_field(&self, field: &Field<'_>) -> Option<ValidationError> {
        let rules = grammar::parse(field.rules);
        if rules.is_empty() {
            return None;
        }

        let value = field.value.field_value();
        let failed = rules
            .into_iter()
            .find(|rule| !self.rules.evaluate(&value, rule.name, rule.param))?;

        trace_trace!(field = field.name, rule = failed.name, "field failed validation");

        Some(ValidationError::render(
            self.messages,
            field.name,
            field.display_label(),
            failed.name,
            failed.param,
            field.value.snapshot(),
        ))
    }
}
