//! Rule annotation grammar.
//!
//! An annotation is a comma separated list of rules, each optionally carrying
//! a parameter after the first `=`:
//!
//! ```text
//! <rules> ::= <rule> (',' <rule>)*
//! <rule>  ::= <name> ['=' <parameter>]
//! ```
//!
//! Parameters may themselves contain `=`. Whitespace around each rule token
//! is ignored and empty tokens are dropped. The literals `""` and `"-"` mean
//! the field carries no rules at all.

use serde::Serialize;
use std::fmt;

/// A single `name[=param]` entry of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedRule<'a> {
    /// Rule name used for dispatch and message lookup
    pub name: &'a str,
    /// Raw parameter text, empty when the rule has none
    pub param: &'a str,
}

impl<'a> ParsedRule<'a> {
    /// Split one already-trimmed token on its first `=`.
    pub fn from_token(token: &'a str) -> Self {
        match token.split_once('=') {
            Some((name, param)) => Self { name, param },
            None => Self {
                name: token,
                param: "",
            },
        }
    }
}

impl fmt::Display for ParsedRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.param.is_empty() {
            f.write_str(self.name)
        } else {
            write!(f, "{}={}", self.name, self.param)
        }
    }
}

/// Returns `true` when the annotation explicitly disables validation.
pub fn is_skip(annotation: &str) -> bool {
    annotation.is_empty() || annotation == "-"
}

/// Parse an annotation into its ordered rule list.
pub fn parse(annotation: &str) -> Vec<ParsedRule<'_>> {
    if is_skip(annotation) {
        return Vec::new();
    }

    annotation
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ParsedRule::from_token)
        .collect()
}
