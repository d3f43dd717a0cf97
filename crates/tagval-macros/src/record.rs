//! `Record` derive implementation.
//!
//! Generates a `tagval::Record` impl listing the annotated public fields
//! and embedded records in declaration order.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Field, Fields, Ident, LitStr,
    Visibility,
};

/// Main entry point for the Validate derive macro.
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_record_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_record_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Validate derive only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Validate derive only supports structs",
            ))
        }
    };

    let mut entries = Vec::new();
    let mut bounds: Vec<syn::WherePredicate> = Vec::new();

    for field in fields {
        let attrs = FieldAttrs::parse(field)?;

        // Private fields are invisible to validation.
        if !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }

        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let ty = &field.ty;

        if attrs.embed {
            bounds.push(parse_quote!(#ty: ::tagval::Record));
            entries.push(quote! {
                ::tagval::Entry::Embedded(&self.#ident)
            });
            continue;
        }

        let Some(rules) = attrs.rules.as_deref() else {
            continue;
        };
        if rules.is_empty() || rules == "-" {
            continue;
        }

        bounds.push(parse_quote!(#ty: ::tagval::Inspect));
        entries.push(field_entry(ident, rules, &attrs));
    }

    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        generics.make_where_clause().predicates.extend(bounds);
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::tagval::Record for #name #ty_generics #where_clause {
            fn entries(&self) -> ::std::vec::Vec<::tagval::Entry<'_>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}

fn field_entry(ident: &Ident, rules: &str, attrs: &FieldAttrs) -> TokenStream2 {
    let name = ident.unraw().to_string();
    let label = option_str(attrs.label.as_deref());
    let serde_name = option_str(attrs.serde_name.as_deref());

    quote! {
        ::tagval::Entry::Field(::tagval::Field {
            name: #name,
            label: #label,
            serde_name: #serde_name,
            rules: #rules,
            value: &self.#ident,
        })
    }
}

fn option_str(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(value) => quote!(::std::option::Option::Some(#value)),
        None => quote!(::std::option::Option::None),
    }
}

/// What the field attributes say about one field.
#[derive(Default)]
struct FieldAttrs {
    seen_validate: bool,
    rules: Option<String>,
    embed: bool,
    label: Option<String>,
    serde_name: Option<String>,
}

impl FieldAttrs {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut attrs = FieldAttrs::default();

        for attr in &field.attrs {
            if attr.path().is_ident("validate") {
                attrs.parse_validate(attr)?;
            } else if attr.path().is_ident("label") {
                if attrs.label.is_some() {
                    return Err(syn::Error::new_spanned(attr, "duplicate #[label] attribute"));
                }
                let label: LitStr = attr.parse_args()?;
                attrs.label = Some(label.value());
            } else if attr.path().is_ident("serde") {
                attrs.parse_serde(attr);
            }
        }

        Ok(attrs)
    }

    fn parse_validate(&mut self, attr: &Attribute) -> syn::Result<()> {
        if self.seen_validate {
            return Err(syn::Error::new_spanned(attr, "duplicate #[validate] attribute"));
        }
        self.seen_validate = true;

        if let Ok(rules) = attr.parse_args::<LitStr>() {
            self.rules = Some(rules.value());
            return Ok(());
        }

        let flag: Ident = attr.parse_args().map_err(|_| {
            syn::Error::new_spanned(
                attr,
                "expected #[validate(\"rules\")] or #[validate(embed)]",
            )
        })?;
        if flag == "embed" {
            self.embed = true;
            Ok(())
        } else {
            Err(syn::Error::new_spanned(
                flag,
                "unknown validate option, expected `embed`",
            ))
        }
    }

    /// Picks up `rename`; everything else belongs to serde, which reports
    /// its own errors. `flatten` does not imply embedding.
    fn parse_serde(&mut self, attr: &Attribute) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if meta.input.peek(syn::Token![=]) {
                    let name: LitStr = meta.value()?.parse()?;
                    self.serde_name = Some(name.value());
                } else {
                    meta.parse_nested_meta(|inner| {
                        let value: LitStr = inner.value()?.parse()?;
                        if inner.path.is_ident("serialize") {
                            self.serde_name = Some(value.value());
                        }
                        Ok(())
                    })?;
                }
            } else if meta.input.peek(syn::Token![=]) {
                meta.value()?.parse::<syn::Expr>()?;
            } else if meta.input.peek(syn::token::Paren) {
                let _content;
                syn::parenthesized!(_content in meta.input);
            }
            Ok(())
        });
    }
}
