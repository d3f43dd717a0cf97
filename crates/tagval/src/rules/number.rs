//! Kind-generic numeric comparison.

use crate::value::FieldValue;
use std::cmp::Ordering;

/// A numeric field value in its widest representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Number {
    /// The numeric view of a field value, if it has one.
    pub fn from_value(value: &FieldValue<'_>) -> Option<Self> {
        match value {
            FieldValue::Int(v) => Some(Number::Int(*v)),
            FieldValue::Uint(v) => Some(Number::Uint(*v)),
            FieldValue::Float(v) => Some(Number::Float(*v)),
            _ => None,
        }
    }

    /// Compare against a textual parameter.
    ///
    /// The parameter is parsed in the value's own representation: integer
    /// kinds only accept integer parameters, so `gt=1.5` never matches an
    /// integer. A negative parameter compares below every unsigned value.
    /// Returns `None` when the parameter does not parse, which callers treat
    /// as a failed rule.
    pub fn cmp_param(self, param: &str) -> Option<Ordering> {
        match self {
            Number::Int(v) => Some(v.cmp(&param.parse::<i64>().ok()?)),
            Number::Uint(v) => {
                if let Ok(p) = param.parse::<u64>() {
                    Some(v.cmp(&p))
                } else {
                    // an i64 that is not a u64 is negative
                    param.parse::<i64>().ok().map(|_| Ordering::Greater)
                }
            }
            Number::Float(v) => v.partial_cmp(&param.parse::<f64>().ok()?),
        }
    }

    /// Decimal rendering for integer kinds, used by `oneof`.
    pub fn to_decimal(self) -> Option<String> {
        match self {
            Number::Int(v) => Some(v.to_string()),
            Number::Uint(v) => Some(v.to_string()),
            Number::Float(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_comparisons() {
        assert_eq!(Number::Int(5).cmp_param("5"), Some(Ordering::Equal));
        assert_eq!(Number::Int(-2).cmp_param("3"), Some(Ordering::Less));
    }

    #[test]
    fn integers_reject_fractional_params() {
        assert_eq!(Number::Int(2).cmp_param("1.5"), None);
        assert_eq!(Number::Int(2).cmp_param("1e0"), None);
        assert_eq!(Number::Uint(2).cmp_param("1.5"), None);
    }

    #[test]
    fn unsigned_against_negative() {
        assert_eq!(Number::Uint(0).cmp_param("-1"), Some(Ordering::Greater));
        assert_eq!(
            Number::Uint(u64::MAX).cmp_param("18446744073709551615"),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn float_comparisons() {
        assert_eq!(Number::Float(2.5).cmp_param("2.5"), Some(Ordering::Equal));
        assert_eq!(Number::Float(2.5).cmp_param("3"), Some(Ordering::Less));
        assert_eq!(Number::Float(f64::NAN).cmp_param("1"), None);
    }

    #[test]
    fn unparsable_param_has_no_ordering() {
        assert_eq!(Number::Int(1).cmp_param("abc"), None);
        assert_eq!(Number::Uint(1).cmp_param(""), None);
        assert_eq!(Number::Float(1.0).cmp_param("bad"), None);
    }

    #[test]
    fn decimal_only_for_integers() {
        assert_eq!(Number::Int(-7).to_decimal().as_deref(), Some("-7"));
        assert_eq!(Number::Uint(7).to_decimal().as_deref(), Some("7"));
        assert_eq!(Number::Float(7.0).to_decimal(), None);
    }
}
