//! Generic type parameter handling and trait bound management.
//!
//! This module adds bounds only for generics that are used by converted or
//! opaque fields. Skipped fields add nothing.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are explicitly skipped when collecting generics:
//!
//! ```ignore
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T should NOT require IntoValue
//! }
//! ```
//!
//! `PhantomData` converts to `Null` on its own, whatever `T` is.

use syn::{parse_quote, Ident};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(segment) = path.path.segments.last() {
                if segment.ident == "PhantomData" {
                    return;
                }

                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect_generics_from_type(inner_ty, generics, result);
                        }
                    }
                }

                for param in generics.type_params() {
                    if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        _ => {}
    }
}

/// Adds `IntoValue` bounds to generic parameters used in converted fields.
pub(crate) fn add_into_value_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            let into_value_path = crate_path("IntoValue");
            param.bounds.push(parse_quote!(#into_value_path));
        }
    }
    generics
}

/// Adds `Debug + 'static` bounds to generic parameters used in opaque fields.
pub(crate) fn add_opaque_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::fmt::Debug));
            param.bounds.push(parse_quote!('static));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn collect(ty: syn::Type, generics: &syn::Generics) -> Vec<String> {
        let mut result = Vec::new();
        collect_generics_from_type(&ty, generics, &mut result);
        result.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn nested_generics_are_found() {
        let generics: syn::Generics = parse_quote!(<K, V, U>);
        assert_eq!(
            collect(parse_quote!(Vec<(K, Option<V>)>), &generics),
            vec!["K", "V"]
        );
    }

    #[test]
    fn references_and_arrays_are_followed() {
        let generics: syn::Generics = parse_quote!(<T>);
        assert_eq!(collect(parse_quote!(&'a [T; 4]), &generics), vec!["T"]);
    }

    #[test]
    fn phantom_data_is_ignored() {
        let generics: syn::Generics = parse_quote!(<T>);
        assert!(collect(parse_quote!(::core::marker::PhantomData<T>), &generics).is_empty());
    }
}
