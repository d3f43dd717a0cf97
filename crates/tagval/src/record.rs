//! The record abstraction walked by the validator.
//!
//! A [`Record`] lists its entries in declaration order. Each entry is either
//! a field carrying a rule annotation, or an embedded sub-record whose own
//! entries are walked in place. Records are normally produced by
//! `#[derive(Validate)]`, which only emits entries for `pub` fields.

use crate::value::Inspect;

/// One validatable field of a record.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    /// Declared field name, reported as the error's `field`
    pub name: &'a str,
    /// Explicit display label
    pub label: Option<&'a str>,
    /// Serialization name, e.g. from `#[serde(rename = "...")]`
    pub serde_name: Option<&'a str>,
    /// Rule annotation, see [`grammar`](crate::grammar)
    pub rules: &'a str,
    /// The field's value
    pub value: &'a dyn Inspect,
}

impl<'a> Field<'a> {
    /// A field with no label or serialization name.
    pub fn new(name: &'a str, rules: &'a str, value: &'a dyn Inspect) -> Self {
        Self {
            name,
            label: None,
            serde_name: None,
            rules,
            value,
        }
    }

    /// Set the display label.
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the serialization name.
    pub fn serde_name(mut self, name: &'a str) -> Self {
        self.serde_name = Some(name);
        self
    }

    /// The name used in rendered messages.
    ///
    /// Resolution order: explicit label, then the serialization name up to
    /// its first `,`, then the declared name. Empty strings and a `-`
    /// serialization name count as absent.
    pub fn display_label(&self) -> &'a str {
        if let Some(label) = self.label.filter(|l| !l.is_empty()) {
            return label;
        }
        match self.serde_name {
            Some(serde_name) if !serde_name.is_empty() && serde_name != "-" => serde_name
                .split(',')
                .next()
                .unwrap_or(serde_name),
            _ => self.name,
        }
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("serde_name", &self.serde_name)
            .field("rules", &self.rules)
            .field("value", &self.value.field_value())
            .finish()
    }
}

/// An entry yielded by [`Record::entries`].
#[derive(Clone, Copy)]
pub enum Entry<'a> {
    /// A field validated against its annotation
    Field(Field<'a>),
    /// An embedded record flattened into the parent
    Embedded(&'a dyn Record),
}

/// A structured value whose fields can be validated.
///
/// ```rust,ignore
/// use tagval::{Entry, Field, Record};
///
/// pub struct Login {
///     pub username: String,
/// }
///
/// impl Record for Login {
///     fn entries(&self) -> Vec<Entry<'_>> {
///         vec![Entry::Field(
///             Field::new("username", "required,min=3", &self.username).label("Username"),
///         )]
///     }
/// }
/// ```
pub trait Record {
    /// Visible entries in declaration order.
    fn entries(&self) -> Vec<Entry<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn entries(&self) -> Vec<Entry<'_>> {
        (**self).entries()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn entries(&self) -> Vec<Entry<'_>> {
        (**self).entries()
    }
}

impl<R: Record + ?Sized> Record for std::sync::Arc<R> {
    fn entries(&self) -> Vec<Entry<'_>> {
        (**self).entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_wins_over_everything() {
        let value = String::new();
        let field = Field::new("user_name", "", &value)
            .label("User name")
            .serde_name("userName");
        assert_eq!(field.display_label(), "User name");
    }

    #[test]
    fn serde_name_cut_at_first_comma() {
        let value = String::new();
        let field = Field::new("user_name", "", &value).serde_name("userName,omitempty");
        assert_eq!(field.display_label(), "userName");
    }

    #[test]
    fn falls_back_to_declared_name() {
        let value = 0u8;
        assert_eq!(Field::new("age", "", &value).display_label(), "age");
        assert_eq!(
            Field::new("age", "", &value).serde_name("-").display_label(),
            "age"
        );
        assert_eq!(
            Field::new("age", "", &value).label("").display_label(),
            "age"
        );
    }
}
