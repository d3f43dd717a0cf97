//! Procedural macros for tagval
//!
//! This crate provides the derive macro used by `tagval`:
//!
//! - `#[derive(Validate)]` - implements `tagval::Record` for a struct with
//!   named fields, which in turn makes it `tagval::Validate`
//!
//! Depend on `tagval` rather than on this crate directly; it re-exports the
//! macro.

mod record;

use proc_macro::TokenStream;

/// Derive `tagval::Record` from field annotations.
///
/// # Attributes
///
/// - `#[validate("rules")]` - rule annotation, e.g. `"required,min=3"`.
///   `""` and `"-"` leave the field unvalidated.
/// - `#[validate(embed)]` - the field is a record whose fields are
///   validated as if declared here.
/// - `#[label("...")]` - display name used in messages.
/// - `#[serde(rename = "...")]` - used as the display name when no label is
///   given. `#[serde(flatten)]` has no effect here; pair it with
///   `#[validate(embed)]` to validate the flattened record.
///
/// Fields that are not `pub` are never validated.
///
/// # Example
///
/// ```rust,ignore
/// use tagval::Validate;
///
/// #[derive(Validate)]
/// pub struct Register {
///     #[validate(embed)]
///     pub base: BaseRequest,
///
///     #[validate("required,username,range=3-20")]
///     #[label("Username")]
///     pub username: String,
///
///     #[validate("password=8")]
///     #[serde(rename = "pwd")]
///     pub password: String,
/// }
/// ```
#[proc_macro_derive(Validate, attributes(validate, label, serde))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
