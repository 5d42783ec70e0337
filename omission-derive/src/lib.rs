//! Derive macros for `omission`.
//!
//! This crate generates the conversion code behind `#[derive(IntoValue)]`. It:
//! - reads `#[omission(...)]` container, variant and field attributes
//! - emits an `IntoValue` implementation that builds an `omission::Value`
//!
//! It does **not** implement the omission engine. That lives in the main
//! `omission` crate and runs on the converted values.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::{Ident, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_into_value_bounds, add_opaque_bounds};

/// Derives `omission::IntoValue` for structs and enums.
///
/// # Shapes
///
/// - Named struct: an `Object` with one entry per field, in declaration order.
/// - Tuple struct with a single field: that field's value. With several fields:
///   an `Array`. Unit struct: `Null`.
/// - Enum: unit variants become their name as a `String`; other variants become
///   `{ "Variant": <payload> }` where the payload follows the struct rules.
///
/// # Container Attributes
///
/// - `#[omission(opaque)]` - The whole value becomes `Value::Opaque`, so the
///   omission engine never opens it. Requires `Debug + 'static`.
///
/// # Variant Attributes
///
/// - `#[omission(rename = "name")]` - Use `name` as the variant tag.
///
/// # Field Attributes
///
/// - **No annotation**: The field is converted with `IntoValue`.
/// - `#[omission(skip)]`: The field is left out of the value.
/// - `#[omission(opaque)]`: The field is wrapped as `Value::Opaque`. Use this for
///   external types that do not implement `IntoValue`.
/// - `#[omission(rename = "name")]`: Use `name` as the entry key.
///
/// Unions are rejected at compile time.
#[proc_macro_derive(IntoValue, attributes(omission))]
pub fn derive_into_value(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the omission crate root.
///
/// Handles crate renaming (e.g., `my_omit = { package = "omission", ... }`)
/// and internal usage. Inside the omission crate, and in its doctests, the
/// crate is reached through its `extern crate self as omission` alias: a bare
/// `crate` would name the doctest crate there.
fn crate_root() -> TokenStream {
    match crate_name("omission") {
        Ok(FoundCrate::Itself) => quote! { ::omission },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::omission },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = format_ident!("{}", item);
    quote! { #root::#item_ident }
}

struct DeriveOutput {
    body: TokenStream,
    converted_generics: Vec<Ident>,
    opaque_generics: Vec<Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { opaque } = parse_container_options(&attrs)?;

    if let Data::Union(u) = &data {
        return Err(syn::Error::new(
            u.union_token.span(),
            "`IntoValue` cannot be derived for unions",
        ));
    }

    let crate_root = crate_root();

    if opaque {
        let (_, ty_generics, _) = generics.split_for_impl();
        let self_ty: syn::Type = parse_quote!(#ident #ty_generics);
        let mut opaque_generics = generics.clone();
        let where_clause = opaque_generics.make_where_clause();
        where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::core::fmt::Debug + 'static));
        let (impl_generics, ty_generics, where_clause) = opaque_generics.split_for_impl();
        return Ok(quote! {
            impl #impl_generics #crate_root::IntoValue for #ident #ty_generics #where_clause {
                fn into_value(self) -> #crate_root::Value {
                    #crate_root::Value::Opaque(#crate_root::Opaque::new(self))
                }
            }
        });
    }

    let derive_output = match data {
        Data::Struct(data) => derive_struct(data, &generics)?,
        Data::Enum(data) => derive_enum(data, &generics)?,
        Data::Union(_) => unreachable!("unions are rejected above"),
    };

    let bounded = add_into_value_bounds(generics.clone(), &derive_output.converted_generics);
    let bounded = add_opaque_bounds(bounded, &derive_output.opaque_generics);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let body = &derive_output.body;

    Ok(quote! {
        impl #impl_generics #crate_root::IntoValue for #ident #ty_generics #where_clause {
            fn into_value(self) -> #crate_root::Value {
                #body
            }
        }
    })
}
