//! Enum-specific `IntoValue` derivation.
//!
//! This module generates one match arm per variant. Unit variants become their
//! name; every other variant becomes a single-entry object keyed by its name.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, DataEnum, Fields, LitStr, Result};

use crate::{
    crate_root,
    strategy::parse_variant_rename,
    transform::{generate_fields, DeriveContext, FieldsOutput},
    DeriveOutput,
};

pub(crate) fn derive_enum(data: DataEnum, generics: &syn::Generics) -> Result<DeriveOutput> {
    let root = crate_root();
    let mut arms = Vec::new();
    let mut converted_generics = Vec::new();
    let mut opaque_generics = Vec::new();

    for variant in data.variants {
        let variant_ident = variant.ident;
        let tag = parse_variant_rename(&variant.attrs)?.unwrap_or_else(|| {
            LitStr::new(&variant_ident.unraw().to_string(), variant_ident.span())
        });

        if matches!(variant.fields, Fields::Unit) {
            arms.push(quote! {
                Self::#variant_ident => #root::Value::from(#tag)
            });
            continue;
        }

        let mut ctx = DeriveContext {
            generics,
            root: &root,
            converted_generics: &mut converted_generics,
            opaque_generics: &mut opaque_generics,
        };
        let FieldsOutput { pattern, value } = generate_fields(&mut ctx, variant.fields)?;
        arms.push(tagged_arm(&root, &variant_ident, &pattern, &tag, &value));
    }

    Ok(DeriveOutput {
        body: quote! {
            match self {
                #(#arms),*
            }
        },
        converted_generics,
        opaque_generics,
    })
}

fn tagged_arm(
    root: &TokenStream,
    variant_ident: &syn::Ident,
    pattern: &TokenStream,
    tag: &LitStr,
    value: &TokenStream,
) -> TokenStream {
    quote! {
        Self::#variant_ident #pattern => #root::Value::Object(#root::Object::from_entries(
            ::std::vec![(#root::Key::from(#tag), #value)],
        ))
    }
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{Data, DeriveInput};

    use super::derive_enum;

    fn body_of(tokens: proc_macro2::TokenStream) -> syn::Result<String> {
        let input: DeriveInput = syn::parse2(tokens).expect("should parse as DeriveInput");
        let Data::Enum(data) = input.data else {
            panic!("expected an enum");
        };
        derive_enum(data, &input.generics).map(|output| output.body.to_string())
    }

    #[test]
    fn unit_variants_become_their_name() {
        let body = body_of(quote! {
            enum Status { Active, #[omission(rename = "gone")] Deleted }
        })
        .unwrap();
        assert!(body.contains("Self :: Active => :: omission :: Value :: from (\"Active\")"));
        assert!(body.contains("Value :: from (\"gone\")"));
    }

    #[test]
    fn data_variants_are_tagged() {
        let body = body_of(quote! {
            enum Event { Created { id: u64 }, Moved(i32, i32) }
        })
        .unwrap();
        assert!(body.contains("Key :: from (\"Created\")"));
        assert!(body.contains("Self :: Moved (field_0 , field_1)"));
    }

    #[test]
    fn variant_skip_is_rejected() {
        let result = body_of(quote! {
            enum Event { #[omission(skip)] Hidden }
        });
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("only `rename` is supported"));
    }

    #[test]
    fn empty_enum_matches_nothing() {
        let body = body_of(quote! { enum Never {} }).unwrap();
        assert_eq!(body, "match self { }");
    }
}
