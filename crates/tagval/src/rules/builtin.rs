//! Built-in rule predicates.
//!
//! Format rules (`email`, `alpha`, ...) only accept strings and pass on an
//! empty string; rejecting blank input is `required`'s job. Rules that take
//! a numeric parameter fail when the parameter does not parse.

use super::number::Number;
use crate::patterns::Pattern;
use crate::value::FieldValue;
use regex::Regex;
use std::cmp::Ordering;

pub(super) type Predicate = fn(&FieldValue<'_>, &str) -> bool;

/// Names of every built-in rule.
pub const BUILTIN_RULES: &[&str] = &[
    "required",
    "min",
    "max",
    "len",
    "range",
    "email",
    "phone",
    "url",
    "ip",
    "alpha",
    "alphanum",
    "numeric",
    "number",
    "lowercase",
    "uppercase",
    "contains",
    "startswith",
    "endswith",
    "regex",
    "eq",
    "ne",
    "gt",
    "gte",
    "lt",
    "lte",
    "oneof",
    "username",
    "password",
    "idcard",
];

pub(super) fn lookup(name: &str) -> Option<Predicate> {
    let predicate: Predicate = match name {
        "required" => required,
        "min" => min,
        "max" => max,
        "len" => len,
        "range" => range,
        "email" => |v, _| matches_pattern(v, Pattern::Email),
        "phone" => |v, _| matches_pattern(v, Pattern::Phone),
        "url" => |v, _| matches_pattern(v, Pattern::Url),
        "ip" => ip,
        "alpha" => |v, _| matches_pattern(v, Pattern::Alpha),
        "alphanum" => |v, _| matches_pattern(v, Pattern::AlphaNum),
        "numeric" => |v, _| matches_pattern(v, Pattern::Numeric),
        "number" => |v, _| matches_pattern(v, Pattern::Number),
        "lowercase" => |v, _| non_empty_str(v, |s| s == s.to_lowercase()),
        "uppercase" => |v, _| non_empty_str(v, |s| s == s.to_uppercase()),
        "contains" => |v, p| v.as_str().is_some_and(|s| s.contains(p)),
        "startswith" => |v, p| non_empty_str(v, |s| s.starts_with(p)),
        "endswith" => |v, p| non_empty_str(v, |s| s.ends_with(p)),
        "regex" => regex,
        "eq" => eq,
        "ne" => ne,
        "gt" => |v, p| compare(v, p, |o| o == Ordering::Greater),
        "gte" => |v, p| compare(v, p, |o| o != Ordering::Less),
        "lt" => |v, p| compare(v, p, |o| o == Ordering::Less),
        "lte" => |v, p| compare(v, p, |o| o != Ordering::Greater),
        "oneof" => oneof,
        "username" => |v, _| matches_pattern(v, Pattern::Username),
        "password" => password,
        "idcard" => |v, _| matches_pattern(v, Pattern::IdCard),
        _ => return None,
    };
    Some(predicate)
}

fn required(value: &FieldValue<'_>, _: &str) -> bool {
    match value {
        FieldValue::Str(s) => !s.trim().is_empty(),
        FieldValue::Seq(len) | FieldValue::Map(len) => *len > 0,
        FieldValue::Optional(inner) => inner.is_some(),
        FieldValue::Int(v) => *v != 0,
        FieldValue::Uint(v) => *v != 0,
        FieldValue::Float(v) => *v != 0.0,
        // a bool cannot be "missing"
        FieldValue::Bool(_) => true,
        FieldValue::Opaque { is_zero } => !is_zero,
    }
}

/// Char count for strings, element count for collections.
fn measured_len(value: &FieldValue<'_>) -> Option<usize> {
    match value {
        FieldValue::Str(s) => Some(s.chars().count()),
        other => other.len(),
    }
}

/// `min`, `max` and `range` bounds are whole numbers for every kind.
fn bound(value: &FieldValue<'_>, param: &str, accept: fn(Ordering) -> bool) -> bool {
    let Ok(limit) = param.parse::<i64>() else {
        return false;
    };
    match measured_len(value) {
        Some(len) => accept((len as i64).cmp(&limit)),
        None => compare(value, param, accept),
    }
}

fn min(value: &FieldValue<'_>, param: &str) -> bool {
    bound(value, param, |o| o != Ordering::Less)
}

fn max(value: &FieldValue<'_>, param: &str) -> bool {
    bound(value, param, |o| o != Ordering::Greater)
}

fn len(value: &FieldValue<'_>, param: &str) -> bool {
    match (measured_len(value), param.parse::<usize>()) {
        (Some(len), Ok(expected)) => len == expected,
        _ => false,
    }
}

fn range(value: &FieldValue<'_>, param: &str) -> bool {
    match param.split('-').collect::<Vec<_>>()[..] {
        [lo, hi] => min(value, lo) && max(value, hi),
        _ => false,
    }
}

fn compare(value: &FieldValue<'_>, param: &str, accept: fn(Ordering) -> bool) -> bool {
    Number::from_value(value)
        .and_then(|n| n.cmp_param(param))
        .is_some_and(accept)
}

fn eq(value: &FieldValue<'_>, param: &str) -> bool {
    match value {
        FieldValue::Str(s) => *s == param,
        other => compare(other, param, |o| o == Ordering::Equal),
    }
}

fn ne(value: &FieldValue<'_>, param: &str) -> bool {
    match value {
        FieldValue::Str(s) => *s != param,
        other => compare(other, param, |o| o != Ordering::Equal),
    }
}

/// Strings only; an empty string passes without running `check`.
fn non_empty_str(value: &FieldValue<'_>, check: impl FnOnce(&str) -> bool) -> bool {
    match value {
        FieldValue::Str(s) => s.is_empty() || check(s),
        _ => false,
    }
}

fn matches_pattern(value: &FieldValue<'_>, pattern: Pattern) -> bool {
    non_empty_str(value, |s| pattern.is_match(s))
}

fn ip(value: &FieldValue<'_>, _: &str) -> bool {
    non_empty_str(value, |s| {
        Pattern::Ip.is_match(s)
            && s.split('.')
                .all(|octet| octet.parse::<u16>().is_ok_and(|n| n <= 255))
    })
}

fn regex(value: &FieldValue<'_>, param: &str) -> bool {
    non_empty_str(value, |s| match Regex::new(param) {
        Ok(re) => re.is_match(s),
        Err(_) => false,
    })
}

fn oneof(value: &FieldValue<'_>, param: &str) -> bool {
    let allowed = |candidate: &str| param.split(' ').any(|token| token == candidate);
    match value {
        FieldValue::Str(s) => s.is_empty() || allowed(s),
        other => Number::from_value(other)
            .and_then(Number::to_decimal)
            .is_some_and(|decimal| allowed(&decimal)),
    }
}

const DEFAULT_PASSWORD_LEN: usize = 6;

fn password(value: &FieldValue<'_>, param: &str) -> bool {
    let min_len = if param.is_empty() {
        DEFAULT_PASSWORD_LEN
    } else {
        match param.parse::<usize>() {
            Ok(n) => n,
            Err(_) => return false,
        }
    };

    non_empty_str(value, |s| {
        s.chars().count() >= min_len
            && s.chars().any(|c| c.is_ascii_alphabetic())
            && s.chars().any(|c| c.is_ascii_digit())
    })
}
