//! Shared field conversion logic for struct and enum derivation.
//!
//! Structs and enum variants have the same three field shapes, so both
//! derivations destructure their fields with the pattern built here and
//! assemble the payload value the same way.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, Fields, LitStr, Result};

use crate::{
    crate_path,
    generics::collect_generics_from_type,
    strategy::{parse_field_options, Strategy},
};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) root: &'a TokenStream,
    pub(crate) converted_generics: &'a mut Vec<Ident>,
    pub(crate) opaque_generics: &'a mut Vec<Ident>,
}

/// A destructuring pattern for a set of fields and the `Value` they build.
pub(crate) struct FieldsOutput {
    /// `{ a: field_0, b: _ }`, `(field_0, _)`, or nothing for unit shapes.
    pub(crate) pattern: TokenStream,
    pub(crate) value: TokenStream,
}

/// Generates the expression converting one bound field into a `Value`.
///
/// Returns `None` for skipped fields.
///
/// | Annotation | Behavior |
/// |------------|----------|
/// | None | `IntoValue::into_value(field)` |
/// | `#[omission(opaque)]` | `Value::Opaque(Opaque::new(field))` |
/// | `#[omission(skip)]` | dropped |
pub(crate) fn generate_field_value(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    binding: &Ident,
    span: Span,
    strategy: Strategy,
) -> Option<TokenStream> {
    let root = ctx.root;
    match strategy {
        Strategy::Convert => {
            collect_generics_from_type(ty, ctx.generics, ctx.converted_generics);
            let into_value = crate_path("IntoValue");
            Some(quote_spanned! { span =>
                #into_value::into_value(#binding)
            })
        }
        Strategy::Opaque => {
            collect_generics_from_type(ty, ctx.generics, ctx.opaque_generics);
            Some(quote_spanned! { span =>
                #root::Value::Opaque(#root::Opaque::new(#binding))
            })
        }
        Strategy::Skip => None,
    }
}

pub(crate) fn generate_fields(ctx: &mut DeriveContext<'_>, fields: Fields) -> Result<FieldsOutput> {
    match fields {
        Fields::Named(fields) => generate_named_fields(ctx, fields),
        Fields::Unnamed(fields) => generate_unnamed_fields(ctx, fields),
        Fields::Unit => {
            let root = ctx.root;
            Ok(FieldsOutput {
                pattern: TokenStream::new(),
                value: quote! { #root::Value::Null },
            })
        }
    }
}

fn generate_named_fields(
    ctx: &mut DeriveContext<'_>,
    fields: syn::FieldsNamed,
) -> Result<FieldsOutput> {
    let mut patterns = Vec::new();
    let mut inserts = Vec::new();

    for (index, field) in fields.named.into_iter().enumerate() {
        let span = field.span();
        let options = parse_field_options(&field.attrs)?;
        let ident = field
            .ident
            .ok_or_else(|| syn::Error::new(span, "named field should have an identifier"))?;
        let binding = format_ident!("field_{index}");

        let Some(value) = generate_field_value(ctx, &field.ty, &binding, span, options.strategy)
        else {
            patterns.push(quote! { #ident: _ });
            continue;
        };

        let key = options
            .rename
            .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));
        patterns.push(quote! { #ident: #binding });
        let root = ctx.root;
        inserts.push(quote_spanned! { span =>
            #root::Object::insert(&object, #key, #value);
        });
    }

    let root = ctx.root;
    Ok(FieldsOutput {
        pattern: quote! { { #(#patterns),* } },
        value: quote! {
            {
                let object = #root::Object::new();
                #(#inserts)*
                #root::Value::Object(object)
            }
        },
    })
}

fn generate_unnamed_fields(
    ctx: &mut DeriveContext<'_>,
    fields: syn::FieldsUnnamed,
) -> Result<FieldsOutput> {
    let field_count = fields.unnamed.len();
    let mut patterns = Vec::new();
    let mut values = Vec::new();

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let span = field.span();
        let options = parse_field_options(&field.attrs)?;
        if let Some(rename) = options.rename {
            return Err(syn::Error::new(
                rename.span(),
                "`rename` is only supported on named fields",
            ));
        }
        let binding = format_ident!("field_{index}");

        match generate_field_value(ctx, &field.ty, &binding, span, options.strategy) {
            Some(value) => {
                patterns.push(quote! { #binding });
                values.push(value);
            }
            None => patterns.push(quote! { _ }),
        }
    }

    let root = ctx.root;
    let value = match values.as_slice() {
        [single] if field_count == 1 => single.clone(),
        _ => quote! {
            #root::Value::Array(#root::Array::from_vec(::std::vec![#(#values),*]))
        },
    };

    Ok(FieldsOutput {
        pattern: quote! { ( #(#patterns),* ) },
        value,
    })
}
