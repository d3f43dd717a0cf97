//! # tagval
//!
//! Declarative, tag-driven validation for Rust structs. Each field carries
//! a comma-separated rule annotation; the validator checks every field in
//! declaration order and reports, for each failing field, the first rule
//! it failed with a human-readable message.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tagval::prelude::*;
//!
//! #[derive(Validate)]
//! pub struct CreateUser {
//!     #[validate("required,min=3,max=20")]
//!     #[label("Username")]
//!     pub username: String,
//!
//!     #[validate("required,email")]
//!     pub email: String,
//!
//!     #[validate("gte=18,lte=120")]
//!     pub age: u8,
//! }
//!
//! let user = CreateUser { username: "ab".into(), email: "a@b.io".into(), age: 30 };
//! let errors = user.validate().unwrap_err();
//! assert_eq!(errors.to_string(), "Username must be at least 3");
//! ```
//!
//! ## Annotation grammar
//!
//! `rule[=param](,rule[=param])*`. An empty annotation or `-` means the field
//! is not validated. Rule names this crate does not know are satisfied.
//!
//! ## Validation Rules
//!
//! - `required` - non-blank string, non-empty collection, non-zero value
//! - `min=N` / `max=N` / `len=N` - character or element count for strings
//!   and collections, numeric comparison otherwise
//! - `range=A-B` - character count between `A` and `B`
//! - `gt` / `gte` / `lt` / `lte` / `eq` / `ne` - numeric comparisons
//!   (`eq` / `ne` also compare strings)
//! - `email`, `phone`, `url`, `ip`, `alpha`, `alphanum`, `numeric`,
//!   `number`, `username`, `idcard` - formats; blank strings pass
//! - `lowercase`, `uppercase`, `contains=S`, `startswith=S`, `endswith=S`
//! - `regex=P` - full regular expression match
//! - `oneof=a b c` - space-separated alternatives
//! - `password[=N]` - at least `N` (default 6) characters with a letter and
//!   a digit
//!
//! ## Error Format
//!
//! [`ValidationErrors::to_api_error`] produces:
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "message": "Username must be at least 3",
//!     "fields": [
//!       {"field": "Username", "code": "min", "message": "Username must be at least 3"}
//!     ]
//!   }
//! }
//! ```

// Lets derive output name `::tagval` from inside this crate's own tests.
extern crate self as tagval;

#[macro_use]
mod tracing_macros;

mod config;
mod error;
pub mod grammar;
mod json;
mod messages;
pub mod patterns;
mod record;
pub mod rules;
mod schema;
mod validate;
mod validator;
mod value;
mod walker;


pub use config::ValidatorConfig;
pub use error::{
    ApiValidationError, Error, ErrorBody, FieldErrorResponse, ValidationError, ValidationErrors,
};
pub use json::{validate_json, FieldRule, FieldRules};
pub use messages::{Locale, MessageCatalog};
pub use record::{Entry, Field, Record};
pub use rules::{RuleFn, RuleTable, BUILTIN_RULES};
pub use schema::{Bound, Schema};
pub use validate::Validate;
pub use validator::{
    default_validator, register_rule, set_message, validate, Validator, ValidatorBuilder,
};
pub use value::{FieldValue, Inspect};

/// Derive [`Record`] (and with it [`Validate`]) for a struct with named fields.
///
/// Field attributes:
///
/// - `#[validate("rules")]` - the rule annotation
/// - `#[validate(embed)]` - flatten an embedded record
/// - `#[label("...")]` - display label for messages
///
/// `#[serde(rename = "...")]` supplies the label when none is given.
/// Only `pub` fields are validated, and `#[validate(embed)]` is the only
/// embedding marker.
pub use tagval_macros::Validate;

/// Prelude module for validation
pub mod prelude {
    pub use crate::error::{Error, ValidationError, ValidationErrors};
    pub use crate::json::FieldRules;
    pub use crate::messages::Locale;
    pub use crate::record::Record;
    pub use crate::schema::Schema;
    pub use crate::validator::Validator;
    pub use crate::Validate;
    pub use crate::value::FieldValue;
}

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
