//! Validation trait and utilities.

use crate::error::ValidationErrors;
use crate::record::Record;
use crate::validator::{default_validator, Validator};

/// Trait for validatable types.
///
/// Implemented for every [`Record`], so `#[derive(Validate)]` is all a
/// struct needs.
///
/// ## Example
///
/// ```rust,ignore
/// use tagval::prelude::*;
///
/// #[derive(Validate)]
/// pub struct CreateUser {
///     #[validate("required,email")]
///     pub email: String,
///
///     #[validate("required,range=3-20")]
///     #[label("Username")]
///     pub username: String,
/// }
///
/// fn example(user: CreateUser) {
///     match user.validate() {
///         Ok(()) => println!("Valid!"),
///         Err(e) => println!("{e}"),
///     }
/// }
/// ```
pub trait Validate: Record {
    /// Validate with the default validator.
    fn validate(&self) -> Result<(), ValidationErrors> {
        default_validator().validate(self)
    }

    /// Validate with a specific validator.
    fn validate_with(&self, validator: &Validator) -> Result<(), ValidationErrors> {
        validator.validate(self)
    }

    /// Validate and return the value if valid, error otherwise.
    fn validated(self) -> Result<Self, ValidationErrors>
    where
        Self: Sized,
    {
        Validate::validate(&self)?;
        Ok(self)
    }
}

impl<T: Record + ?Sized> Validate for T {}
