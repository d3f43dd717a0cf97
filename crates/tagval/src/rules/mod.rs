//! Rule dispatch.
//!
//! A [`RuleTable`] resolves a rule name in three steps:
//!
//! 1. a custom rule registered under that name, even if a built-in of the
//!    same name exists;
//! 2. the built-in rule of that name;
//! 3. otherwise the rule is unknown and counts as satisfied.
//!
//! The last step is a contract: annotations may mention rules this engine
//! does not know, and they never produce errors.

mod builtin;
mod number;

pub use builtin::BUILTIN_RULES;
pub use number::Number;

use crate::value::FieldValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A rule predicate: `true` means the value satisfies the rule.
///
/// The second argument is the raw parameter text (empty if none).
pub type RuleFn = Arc<dyn Fn(&FieldValue<'_>, &str) -> bool + Send + Sync>;

/// Custom rules layered over the built-in set.
#[derive(Clone, Default)]
pub struct RuleTable {
    custom: HashMap<String, RuleFn>,
}

impl RuleTable {
    /// A table containing only the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace a custom rule. Returns the rule it replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, rule: F) -> Option<RuleFn>
    where
        F: Fn(&FieldValue<'_>, &str) -> bool + Send + Sync + 'static,
    {
        self.custom.insert(name.into(), Arc::new(rule))
    }

    /// Whether a custom rule is registered under `name`.
    pub fn has_custom(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Whether `name` resolves to a custom or built-in rule.
    pub fn is_known(&self, name: &str) -> bool {
        self.has_custom(name) || is_builtin(name)
    }

    /// Evaluate one rule against a value.
    pub fn evaluate(&self, value: &FieldValue<'_>, rule: &str, param: &str) -> bool {
        if let Some(custom) = self.custom.get(rule) {
            return custom(value, param);
        }

        match builtin::lookup(rule) {
            Some(predicate) => apply_builtin(predicate, rule, value, param),
            None => {
                trace_trace!(rule = rule, "unknown rule treated as satisfied");
                true
            }
        }
    }
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.custom.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("RuleTable").field("custom", &names).finish()
    }
}

/// Whether `name` is one of the built-in rules.
pub fn is_builtin(name: &str) -> bool {
    builtin::lookup(name).is_some()
}

/// Built-ins see through optional values: `required` tests presence, every
/// other rule passes on an absent value and checks the inner value when
/// present.
fn apply_builtin(
    predicate: builtin::Predicate,
    rule: &str,
    value: &FieldValue<'_>,
    param: &str,
) -> bool {
    match value {
        FieldValue::Optional(inner) if rule != "required" => match inner {
            Some(inner) => apply_builtin(predicate, rule, inner, param),
            None => true,
        },
        _ => predicate(value, param),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_passes() {
        let table = RuleTable::new();
        assert!(table.evaluate(&FieldValue::Str(""), "no_such_rule", ""));
        assert!(!table.is_known("no_such_rule"));
    }

    #[test]
    fn custom_rule_shadows_builtin() {
        let mut table = RuleTable::new();
        assert!(!table.evaluate(&FieldValue::Str("nope"), "email", ""));

        table.register("email", |v: &FieldValue<'_>, _: &str| {
            v.as_str().is_some_and(|s| s.ends_with("@corp"))
        });
        assert!(table.evaluate(&FieldValue::Str("me@corp"), "email", ""));
        assert!(!table.evaluate(&FieldValue::Str("me@example.com"), "email", ""));
    }

    #[test]
    fn register_returns_previous_rule() {
        let mut table = RuleTable::new();
        assert!(table.register("even", |_: &FieldValue<'_>, _: &str| true).is_none());
        assert!(table.register("even", |_: &FieldValue<'_>, _: &str| false).is_some());
        assert!(!table.evaluate(&FieldValue::Int(2), "even", ""));
    }

    #[test]
    fn custom_rule_receives_param() {
        let mut table = RuleTable::new();
        table.register("divisible", |v: &FieldValue<'_>, p: &str| {
            match (v, p.parse::<i64>()) {
                (FieldValue::Int(n), Ok(d)) if d != 0 => n % d == 0,
                _ => false,
            }
        });
        assert!(table.evaluate(&FieldValue::Int(9), "divisible", "3"));
        assert!(!table.evaluate(&FieldValue::Int(10), "divisible", "3"));
    }

    #[test]
    fn optional_values_are_unwrapped_for_builtins() {
        let table = RuleTable::new();
        let absent = FieldValue::Optional(None);
        let present = FieldValue::Optional(Some(Box::new(FieldValue::Str("ab"))));

        assert!(!table.evaluate(&absent, "required", ""));
        assert!(table.evaluate(&absent, "min", "3"));
        assert!(table.evaluate(&present, "required", ""));
        assert!(!table.evaluate(&present, "min", "3"));
    }

    #[test]
    fn present_blank_optional_satisfies_required() {
        let table = RuleTable::new();
        let blank = FieldValue::Optional(Some(Box::new(FieldValue::Str(""))));
        assert!(table.evaluate(&blank, "required", ""));
    }
}
