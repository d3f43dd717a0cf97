//! Precompiled patterns used by the built-in format rules.
//!
//! Every pattern is compiled once on first use and shared across threads.
//! Digit and whitespace classes are spelled out in ASCII because `\d` and
//! `\s` are Unicode-aware in the `regex` crate.

use regex::Regex;
use std::sync::OnceLock;

/// The string formats the built-in rules know how to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Email,
    /// Mainland China mobile number
    Phone,
    Url,
    /// Dotted quad shape only; octet bounds are checked separately
    Ip,
    Alpha,
    AlphaNum,
    /// Unsigned digit run
    Numeric,
    /// Optionally signed decimal
    Number,
    Username,
    /// 18-digit resident identity card number
    IdCard,
}

impl Pattern {
    /// Every known pattern, in declaration order.
    pub const ALL: [Pattern; 10] = [
        Pattern::Email,
        Pattern::Phone,
        Pattern::Url,
        Pattern::Ip,
        Pattern::Alpha,
        Pattern::AlphaNum,
        Pattern::Numeric,
        Pattern::Number,
        Pattern::Username,
        Pattern::IdCard,
    ];

    /// The regular expression source for this pattern.
    pub const fn source(self) -> &'static str {
        match self {
            Pattern::Email => r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$",
            Pattern::Phone => r"^1[3-9][0-9]{9}$",
            Pattern::Url => r"^https?://[^\t\n\f\r /$.?#].[^\t\n\f\r ]*$",
            Pattern::Ip => r"^([0-9]{1,3}\.){3}[0-9]{1,3}$",
            Pattern::Alpha => r"^[a-zA-Z]+$",
            Pattern::AlphaNum => r"^[a-zA-Z0-9]+$",
            Pattern::Numeric => r"^[0-9]+$",
            Pattern::Number => r"^-?[0-9]+\.?[0-9]*$",
            Pattern::Username => r"^[a-zA-Z0-9_]+$",
            Pattern::IdCard => {
                r"^[1-9][0-9]{5}(18|19|20)[0-9]{2}(0[1-9]|1[0-2])(0[1-9]|[12][0-9]|3[01])[0-9]{3}[0-9Xx]$"
            }
        }
    }

    fn cell(self) -> &'static OnceLock<Option<Regex>> {
        static CELLS: [OnceLock<Option<Regex>>; 10] = [
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
        ];
        &CELLS[self as usize]
    }

    /// The compiled regex, built on first access.
    ///
    /// Returns `None` only if the constant source failed to compile, which
    /// the test suite rules out.
    pub fn regex(self) -> Option<&'static Regex> {
        self.cell()
            .get_or_init(|| Regex::new(self.source()).ok())
            .as_ref()
    }

    /// Match `value` against this pattern. A pattern that failed to compile
    /// matches nothing.
    pub fn is_match(self, value: &str) -> bool {
        self.regex().is_some_and(|re| re.is_match(value))
    }
}
