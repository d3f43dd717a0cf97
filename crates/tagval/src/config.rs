//! Validator configuration.
//!
//! ```rust,ignore
//! use tagval::{Validator, ValidatorConfig};
//!
//! let config = ValidatorConfig::from_json(r#"{
//!     "locale": "zh-CN",
//!     "messages": { "required": "请填写{field}" }
//! }"#)?;
//! let validator = Validator::with_config(config);
//! ```

use crate::error::Error;
use crate::messages::{Locale, MessageCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings used to construct a [`Validator`](crate::Validator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Built-in catalog to start from
    pub locale: Locale,
    /// Template for rules without a catalog entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_message: Option<String>,
    /// Per-rule template overrides
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, String>,
}

impl ValidatorConfig {
    /// Create the default configuration (English catalog, no overrides).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the locale.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the fallback template.
    pub fn fallback_message(mut self, template: impl Into<String>) -> Self {
        self.fallback_message = Some(template.into());
        self
    }

    /// Override the template for one rule.
    pub fn message(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(rule.into(), template.into());
        self
    }

    /// The message catalog this configuration describes.
    pub fn catalog(&self) -> MessageCatalog {
        let mut catalog = MessageCatalog::for_locale(self.locale);
        if let Some(fallback) = &self.fallback_message {
            catalog.set_fallback(fallback.clone());
        }
        catalog.extend(self.messages.iter().map(|(k, v)| (k.clone(), v.clone())));
        catalog
    }
}
