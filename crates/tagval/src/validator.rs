//! The validation facade.
//!
//! A [`Validator`] owns one rule table and one message catalog, each an
//! `Arc` behind an `RwLock`. Validation clones both `Arc`s and walks the
//! snapshot with no lock held, so a registration is either fully visible to
//! a validation or not at all, and predicates may call back into the
//! validator.
//!
//! Most callers use the process-wide default instance through the free
//! functions [`validate`], [`register_rule`] and [`set_message`]. Register
//! custom rules and messages during startup, before requests are served.

use crate::config::ValidatorConfig;
use crate::error::ValidationErrors;
use crate::messages::{Locale, MessageCatalog};
use crate::record::Record;
use crate::rules::{self, RuleTable};
use crate::value::FieldValue;
use crate::walker::Walker;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockWriteGuard};

/// Struct validator with its own rule table and message catalog.
#[derive(Debug)]
pub struct Validator {
    rules: RwLock<Arc<RuleTable>>,
    messages: RwLock<Arc<MessageCatalog>>,
}

impl Validator {
    /// A validator with the built-in rules and the English catalog.
    pub fn new() -> Self {
        Self::from_parts(RuleTable::new(), MessageCatalog::english())
    }

    /// A validator configured from `config`.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self::from_parts(RuleTable::new(), config.catalog())
    }

    /// Start building a validator.
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    fn from_parts(rules: RuleTable, messages: MessageCatalog) -> Self {
        Self {
            rules: RwLock::new(Arc::new(rules)),
            messages: RwLock::new(Arc::new(messages)),
        }
    }

    /// Validate a record.
    ///
    /// Returns `Ok(())` when every field satisfies its rules, otherwise one
    /// error per failing field in declaration order.
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> Result<(), ValidationErrors> {
        let (rules, messages) = self.snapshot();
        let walker = Walker {
            rules: &rules,
            messages: &messages,
        };

        let mut errors = ValidationErrors::new();
        walker.walk(&record, &mut errors);

        trace_trace!(errors = errors.len(), "record validated");
        errors.into_result()
    }

    /// Install or replace a custom rule.
    ///
    /// Custom rules take precedence over built-ins with the same name and
    /// apply to every later validation. A validation already in progress
    /// keeps the table it started with.
    pub fn register_rule<F>(&self, name: impl Into<String>, rule: F)
    where
        F: Fn(&FieldValue<'_>, &str) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        trace_debug!(
            rule = %name,
            overrides_builtin = rules::is_builtin(&name),
            "registering custom validation rule"
        );
        Arc::make_mut(&mut *self.write_rules()).register(name, rule);
    }

    /// Install or replace the message template for a rule.
    pub fn set_message(&self, rule: impl Into<String>, template: impl Into<String>) {
        let rule = rule.into();
        trace_debug!(rule = %rule, "validation message overridden");
        Arc::make_mut(&mut *self.write_messages()).set(rule, template);
    }

    /// The template currently registered for a rule.
    pub fn message(&self, rule: &str) -> Option<String> {
        self.read_messages().get(rule).map(str::to_owned)
    }

    /// A copy of the current message catalog.
    pub fn catalog(&self) -> MessageCatalog {
        MessageCatalog::clone(&self.read_messages())
    }

    /// Whether a custom rule is registered under `name`.
    pub fn has_custom_rule(&self, name: &str) -> bool {
        self.read_rules().has_custom(name)
    }

    /// Evaluate a single rule against a value, outside any record.
    pub fn evaluate(&self, value: &FieldValue<'_>, rule: &str, param: &str) -> bool {
        self.read_rules().evaluate(value, rule, param)
    }

    // Registries hold plain data, so a panic while a guard was held cannot
    // leave them half-updated; poisoning is ignored. Read guards live only
    // long enough to clone the `Arc`.

    fn snapshot(&self) -> (Arc<RuleTable>, Arc<MessageCatalog>) {
        let rules = self.read_rules();
        let messages = self.read_messages();
        (rules, messages)
    }

    fn read_rules(&self) -> Arc<RuleTable> {
        Arc::clone(&self.rules.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn read_messages(&self) -> Arc<MessageCatalog> {
        Arc::clone(&self.messages.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write_rules(&self) -> RwLockWriteGuard<'_, Arc<RuleTable>> {
        self.rules.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_messages(&self) -> RwLockWriteGuard<'_, Arc<MessageCatalog>> {
        self.messages.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Validator`].
///
/// ```rust,ignore
/// let validator = Validator::builder()
///     .locale(Locale::ZhCn)
///     .message("required", "请填写{field}")
///     .rule("even", |v, _| matches!(v, FieldValue::Int(n) if n % 2 == 0))
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    config: ValidatorConfig,
    rules: RuleTable,
}

impl ValidatorBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Select the built-in catalog.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    /// Override one rule's template.
    pub fn message(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.config = self.config.message(rule, template);
        self
    }

    /// Set the fallback template.
    pub fn fallback_message(mut self, template: impl Into<String>) -> Self {
        self.config = self.config.fallback_message(template);
        self
    }

    /// Register a custom rule.
    pub fn rule<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&FieldValue<'_>, &str) -> bool + Send + Sync + 'static,
    {
        self.rules.register(name, rule);
        self
    }

    /// Build the validator.
    pub fn build(self) -> Validator {
        Validator::from_parts(self.rules, self.config.catalog())
    }
}

static DEFAULT_VALIDATOR: OnceLock<Validator> = OnceLock::new();

/// The process-wide default validator, created on first use.
pub fn default_validator() -> &'static Validator {
    DEFAULT_VALIDATOR.get_or_init(Validator::new)
}

/// Validate a record with the default validator.
pub fn validate<R: Record + ?Sized>(record: &R) -> Result<(), ValidationErrors> {
    default_validator().validate(record)
}

/// Register a custom rule on the default validator.
pub fn register_rule<F>(name: impl Into<String>, rule: F)
where
    F: Fn(&FieldValue<'_>, &str) -> bool + Send + Sync + 'static,
{
    default_validator().register_rule(name, rule);
}

/// Override a message template on the default validator.
pub fn set_message(rule: impl Into<String>, template: impl Into<String>) {
    default_validator().set_message(rule, template);
}
