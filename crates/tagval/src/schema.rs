//! Runtime record schemas.
//!
//! A [`Schema`] attaches rule annotations to a type from the outside, for
//! types that cannot carry `#[derive(Validate)]` (foreign types, or rules
//! chosen at runtime). Binding a schema to a value produces a [`Record`].
//!
//! ```rust,ignore
//! use tagval::Schema;
//!
//! struct Login { user: String, pass: String }
//!
//! let schema = Schema::new()
//!     .field("user", "required,username", |l: &Login| &l.user)
//!     .label("Username")
//!     .field("pass", "password=8", |l: &Login| &l.pass);
//!
//! schema.validate(&login)?;
//! ```

use crate::error::ValidationErrors;
use crate::record::{Entry, Field, Record};
use crate::validator::{default_validator, Validator};
use crate::value::Inspect;
use std::fmt;
use std::marker::PhantomData;

/// Reads one field's value out of a `T`.
trait Access<T>: Send + Sync {
    fn get<'a>(&self, record: &'a T) -> &'a dyn Inspect;
}

struct FnAccess<F, V> {
    f: F,
    _value: PhantomData<fn() -> V>,
}

impl<T, F, V> Access<T> for FnAccess<F, V>
where
    F: Fn(&T) -> &V + Send + Sync,
    V: Inspect + 'static,
{
    fn get<'a>(&self, record: &'a T) -> &'a dyn Inspect {
        (self.f)(record)
    }
}

/// Reads an embedded record out of a `T`.
trait Project<T>: Send + Sync {
    fn get<'a>(&self, record: &'a T) -> &'a dyn Record;
}

struct FnProject<F, R> {
    f: F,
    _record: PhantomData<fn() -> R>,
}

impl<T, F, R> Project<T> for FnProject<F, R>
where
    F: Fn(&T) -> &R + Send + Sync,
    R: Record + 'static,
{
    fn get<'a>(&self, record: &'a T) -> &'a dyn Record {
        (self.f)(record)
    }
}

struct SchemaField<T> {
    name: String,
    label: Option<String>,
    serde_name: Option<String>,
    rules: String,
    access: Box<dyn Access<T>>,
}

enum SchemaEntry<T> {
    Field(SchemaField<T>),
    Embedded(Box<dyn Project<T>>),
}

/// Rule annotations for a type, declared at runtime.
pub struct Schema<T> {
    entries: Vec<SchemaEntry<T>>,
}

impl<T> Schema<T> {
    /// An empty schema.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare a field with its rule annotation and accessor.
    pub fn field<F, V>(mut self, name: impl Into<String>, rules: impl Into<String>, access: F) -> Self
    where
        F: Fn(&T) -> &V + Send + Sync + 'static,
        V: Inspect + 'static,
    {
        self.entries.push(SchemaEntry::Field(SchemaField {
            name: name.into(),
            label: None,
            serde_name: None,
            rules: rules.into(),
            access: Box::new(FnAccess {
                f: access,
                _value: PhantomData,
            }),
        }));
        self
    }

    /// Set the display label of the most recently declared field.
    ///
    /// Has no effect if the last entry is an embedded record.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        if let Some(SchemaEntry::Field(field)) = self.entries.last_mut() {
            field.label = Some(label.into());
        }
        self
    }

    /// Set the serialization name of the most recently declared field.
    ///
    /// Has no effect if the last entry is an embedded record.
    pub fn serde_name(mut self, name: impl Into<String>) -> Self {
        if let Some(SchemaEntry::Field(field)) = self.entries.last_mut() {
            field.serde_name = Some(name.into());
        }
        self
    }

    /// Declare an embedded record whose entries are validated in place.
    pub fn embed<F, R>(mut self, access: F) -> Self
    where
        F: Fn(&T) -> &R + Send + Sync + 'static,
        R: Record + 'static,
    {
        self.entries.push(SchemaEntry::Embedded(Box::new(FnProject {
            f: access,
            _record: PhantomData,
        })));
        self
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// View `record` through this schema.
    pub fn bind<'a>(&'a self, record: &'a T) -> Bound<'a, T> {
        Bound {
            schema: self,
            record,
        }
    }

    /// Validate `record` with the default validator.
    pub fn validate(&self, record: &T) -> Result<(), ValidationErrors> {
        default_validator().validate(&self.bind(record))
    }

    /// Validate `record` with a specific validator.
    pub fn validate_with(&self, validator: &Validator, record: &T) -> Result<(), ValidationErrors> {
        validator.validate(&self.bind(record))
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for entry in &self.entries {
            match entry {
                SchemaEntry::Field(field) => list.entry(&(&field.name, &field.rules)),
                SchemaEntry::Embedded(_) => list.entry(&"<embedded>"),
            };
        }
        list.finish()
    }
}

/// A value viewed through a [`Schema`].
pub struct Bound<'a, T> {
    schema: &'a Schema<T>,
    record: &'a T,
}

impl<T> Record for Bound<'_, T> {
    fn entries(&self) -> Vec<Entry<'_>> {
        self.schema
            .entries
            .iter()
            .map(|entry| match entry {
                SchemaEntry::Field(field) => Entry::Field(Field {
                    name: &field.name,
                    label: field.label.as_deref(),
                    serde_name: field.serde_name.as_deref(),
                    rules: &field.rules,
                    value: field.access.get(self.record),
                }),
                SchemaEntry::Embedded(project) => Entry::Embedded(project.get(self.record)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Audit {
        created_by: String,
    }

    struct Order {
        audit: Audit,
        sku: String,
        quantity: u32,
        note: Option<String>,
    }

    impl Record for Audit {
        fn entries(&self) -> Vec<Entry<'_>> {
            vec![Entry::Field(Field::new("created_by", "required", &self.created_by))]
        }
    }

    fn audit_schema() -> Schema<Audit> {
        Schema::new().field("created_by", "required", |a: &Audit| &a.created_by)
    }

    fn order_schema() -> Schema<Order> {
        Schema::new()
            .field("sku", "required,alphanum,len=8", |o: &Order| &o.sku)
            .label("SKU")
            .field("quantity", "gt=0,lte=100", |o: &Order| &o.quantity)
            .field("note", "max=20", |o: &Order| &o.note)
            .serde_name("orderNote")
    }

    fn order() -> Order {
        Order {
            audit: Audit {
                created_by: "ops".into(),
            },
            sku: "AB12CD34".into(),
            quantity: 3,
            note: None,
        }
    }

    #[test]
    fn valid_value_passes() {
        assert!(order_schema().validate(&order()).is_ok());
    }

    #[test]
    fn failures_use_labels_and_serde_names() {
        let mut value = order();
        value.sku = "short".into();
        value.note = Some("x".repeat(21));
        let errors = order_schema().validate(&value).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["SKU must have length 8", "orderNote must be at most 20"]
        );
    }

    #[test]
    fn bound_schema_is_a_record() {
        let audits = audit_schema();
        let blank = Audit {
            created_by: String::new(),
        };
        let bound = audits.bind(&blank);
        assert_eq!(bound.entries().len(), 1);
        let errors = Validator::new().validate(&bound).unwrap_err();
        assert_eq!(errors.field_names(), vec!["created_by"]);
    }

    #[test]
    fn embed_flattens_other_records() {
        let schema = order_schema().embed(|o: &Order| &o.audit);
        let mut value = order();
        value.audit.created_by.clear();
        value.quantity = 0;

        let errors = schema.validate_with(&Validator::new(), &value).unwrap_err();
        assert_eq!(errors.field_names(), vec!["quantity", "created_by"]);
    }

    #[test]
    fn label_after_embed_is_ignored() {
        let schema = Schema::<Order>::new().embed(|o: &Order| &o.audit).label("x");
        assert_eq!(schema.len(), 1);
        assert_eq!(format!("{schema:?}"), "[\"<embedded>\"]");
    }
}
