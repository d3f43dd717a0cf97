//! Message catalog and template rendering.
//!
//! Templates use literal placeholders:
//!
//! - `{field}`: the field's display label
//! - `{param}`: the raw rule parameter
//! - `{min}` / `{max}`: for `range` only, the two halves of an `a-b` parameter
//!
//! Substitution is plain text replacement, not a template engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Locales with a built-in default catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-CN", alias = "zh")]
    ZhCn,
}

impl Locale {
    /// The locale tag, e.g. `"zh-CN"`.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

const EN_FALLBACK: &str = "{field} failed validation";

const EN_MESSAGES: &[(&str, &str)] = &[
    ("required", "{field} is required"),
    ("min", "{field} must be at least {param}"),
    ("max", "{field} must be at most {param}"),
    ("len", "{field} must have length {param}"),
    ("range", "{field} must be between {min} and {max}"),
    ("email", "{field} must be a valid email address"),
    ("phone", "{field} must be a valid phone number"),
    ("url", "{field} must be a valid URL"),
    ("ip", "{field} must be a valid IP address"),
    ("alpha", "{field} may only contain letters"),
    ("alphanum", "{field} may only contain letters and digits"),
    ("numeric", "{field} may only contain digits"),
    ("number", "{field} must be a number"),
    ("lowercase", "{field} must be lowercase"),
    ("uppercase", "{field} must be uppercase"),
    ("contains", "{field} must contain {param}"),
    ("startswith", "{field} must start with {param}"),
    ("endswith", "{field} must end with {param}"),
    ("regex", "{field} has an invalid format"),
    ("eq", "{field} must equal {param}"),
    ("ne", "{field} must not equal {param}"),
    ("gt", "{field} must be greater than {param}"),
    ("gte", "{field} must be greater than or equal to {param}"),
    ("lt", "{field} must be less than {param}"),
    ("lte", "{field} must be less than or equal to {param}"),
    ("oneof", "{field} must be one of: {param}"),
    (
        "username",
        "{field} may only contain letters, digits and underscores",
    ),
    (
        "password",
        "{field} must contain letters and digits and be at least {param} characters",
    ),
    ("idcard", "{field} must be a valid ID card number"),
];

const ZH_FALLBACK: &str = "{field}验证失败";

const ZH_MESSAGES: &[(&str, &str)] = &[
    ("required", "{field}不能为空"),
    ("min", "{field}长度不能小于{param}"),
    ("max", "{field}长度不能超过{param}"),
    ("len", "{field}长度必须为{param}"),
    ("range", "{field}长度必须在{min}-{max}之间"),
    ("email", "{field}必须是有效的邮箱地址"),
    ("phone", "{field}必须是有效的手机号"),
    ("url", "{field}必须是有效的URL"),
    ("ip", "{field}必须是有效的IP地址"),
    ("alpha", "{field}只能包含字母"),
    ("alphanum", "{field}只能包含字母和数字"),
    ("numeric", "{field}只能包含数字"),
    ("number", "{field}必须是数字"),
    ("lowercase", "{field}只能包含小写字母"),
    ("uppercase", "{field}只能包含大写字母"),
    ("contains", "{field}必须包含{param}"),
    ("startswith", "{field}必须以{param}开头"),
    ("endswith", "{field}必须以{param}结尾"),
    ("regex", "{field}格式不正确"),
    ("eq", "{field}必须等于{param}"),
    ("ne", "{field}不能等于{param}"),
    ("gt", "{field}必须大于{param}"),
    ("gte", "{field}必须大于或等于{param}"),
    ("lt", "{field}必须小于{param}"),
    ("lte", "{field}必须小于或等于{param}"),
    ("oneof", "{field}必须是以下值之一: {param}"),
    ("username", "{field}只能包含字母、数字和下划线"),
    ("password", "{field}必须包含字母和数字，长度至少{param}位"),
    ("idcard", "{field}必须是有效的身份证号"),
];

/// Rule name to message template mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
    fallback: String,
}

impl MessageCatalog {
    /// The built-in catalog for a locale.
    pub fn for_locale(locale: Locale) -> Self {
        let (entries, fallback) = match locale {
            Locale::En => (EN_MESSAGES, EN_FALLBACK),
            Locale::ZhCn => (ZH_MESSAGES, ZH_FALLBACK),
        };
        Self {
            templates: entries
                .iter()
                .map(|(rule, template)| (rule.to_string(), template.to_string()))
                .collect(),
            fallback: fallback.to_string(),
        }
    }

    /// The English catalog.
    pub fn english() -> Self {
        Self::for_locale(Locale::En)
    }

    /// The Simplified Chinese catalog.
    pub fn chinese() -> Self {
        Self::for_locale(Locale::ZhCn)
    }

    /// A catalog with no templates; every rule renders the fallback.
    pub fn empty(fallback: impl Into<String>) -> Self {
        Self {
            templates: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Install or replace the template for a rule.
    pub fn set(&mut self, rule: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(rule.into(), template.into());
    }

    /// Install several templates at once.
    pub fn extend<I, K, V>(&mut self, templates: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (rule, template) in templates {
            self.set(rule, template);
        }
    }

    /// Replace the template used for rules without an entry.
    pub fn set_fallback(&mut self, template: impl Into<String>) {
        self.fallback = template.into();
    }

    /// The template registered for a rule.
    pub fn get(&self, rule: &str) -> Option<&str> {
        self.templates.get(rule).map(String::as_str)
    }

    /// The fallback template.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Number of rule templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog has no rule templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render the message for a failed rule.
    pub fn render(&self, rule: &str, label: &str, param: &str) -> String {
        let template = self.get(rule).unwrap_or(self.fallback.as_str());
        let mut message = template.replace("{field}", label).replace("{param}", param);

        if rule == "range" {
            if let [min, max] = param.split('-').collect::<Vec<_>>()[..] {
                message = message.replace("{min}", min).replace("{max}", max);
            }
        }

        message
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}
