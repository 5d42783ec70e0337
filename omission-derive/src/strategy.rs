//! Parsing of `#[omission(...)]` field and variant attributes.
//!
//! This module maps attribute syntax to conversion decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// Field conversion strategy based on `#[omission(...)]` attributes.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `Convert` | Field is converted with `IntoValue` |
/// | `#[omission(skip)]` | `Skip` | Field is left out |
/// | `#[omission(opaque)]` | `Opaque` | Field is wrapped as `Value::Opaque` |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// No annotation: convert with `IntoValue`.
    Convert,
    /// `#[omission(skip)]`: the field never appears in the value.
    Skip,
    /// `#[omission(opaque)]`: the field is kept as an opaque leaf.
    ///
    /// Works for any `Debug + 'static` type, including external ones that do
    /// not implement `IntoValue`.
    Opaque,
}

/// Everything `#[omission(...)]` can say about one field.
#[derive(Clone, Debug)]
pub(crate) struct FieldOptions {
    pub(crate) strategy: Strategy,
    pub(crate) rename: Option<LitStr>,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "conflicting #[omission] options on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut strategy: Option<Strategy> = None;
    let mut rename: Option<LitStr> = None;
    for attr in attrs {
        if !attr.path().is_ident("omission") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected an option, e.g. #[omission(skip)], #[omission(opaque)] or #[omission(rename = \"...\")]",
                ));
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        set_strategy(&mut strategy, Strategy::Skip, meta.path.span())
                    } else if meta.path.is_ident("opaque") {
                        set_strategy(&mut strategy, Strategy::Opaque, meta.path.span())
                    } else if meta.path.is_ident("rename") {
                        let name: LitStr = meta.value()?.parse()?;
                        if rename.is_some() {
                            return Err(meta.error("duplicate `rename` option"));
                        }
                        rename = Some(name);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `skip`, `opaque` or `rename`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[omission]; use #[omission(rename = \"...\")]",
                ));
            }
        }
    }

    let strategy = strategy.unwrap_or(Strategy::Convert);
    if let (Strategy::Skip, Some(name)) = (strategy, &rename) {
        return Err(syn::Error::new(
            name.span(),
            "`skip` cannot be combined with other #[omission] options",
        ));
    }
    Ok(FieldOptions { strategy, rename })
}

/// Variants accept `rename` only.
pub(crate) fn parse_variant_rename(attrs: &[Attribute]) -> Result<Option<LitStr>> {
    let options = parse_field_options(attrs)?;
    if options.strategy != Strategy::Convert {
        let span = attrs
            .iter()
            .find(|attr| attr.path().is_ident("omission"))
            .map_or_else(Span::call_site, Spanned::span);
        return Err(syn::Error::new(
            span,
            "only `rename` is supported on enum variants",
        ));
    }
    Ok(options.rename)
}
