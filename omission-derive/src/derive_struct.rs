//! Struct-specific `IntoValue` derivation.
//!
//! This module destructures `self` and collects generic parameters that
//! require trait bounds.

use quote::quote;
use syn::{DataStruct, Fields, Result};

use crate::{
    crate_root,
    transform::{generate_fields, DeriveContext, FieldsOutput},
    DeriveOutput,
};

pub(crate) fn derive_struct(data: DataStruct, generics: &syn::Generics) -> Result<DeriveOutput> {
    let root = crate_root();
    let mut converted_generics = Vec::new();
    let mut opaque_generics = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        root: &root,
        converted_generics: &mut converted_generics,
        opaque_generics: &mut opaque_generics,
    };

    let is_unit = matches!(data.fields, Fields::Unit);
    let FieldsOutput { pattern, value } = generate_fields(&mut ctx, data.fields)?;
    let body = if is_unit {
        value
    } else {
        quote! {
            let Self #pattern = self;
            #value
        }
    };

    Ok(DeriveOutput {
        body,
        converted_generics,
        opaque_generics,
    })
}
