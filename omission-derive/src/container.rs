//! Type-level `#[omission(...)]` options.
//!
//! The only option, `opaque`, makes the generated impl wrap the whole value as
//! an unopened `Value::Opaque` leaf instead of converting its fields.

use syn::{meta::ParseNestedMeta, Attribute, Meta, Result};

#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Wrap `self` in `Opaque` rather than destructuring it.
    pub(crate) opaque: bool,
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("omission")) {
        match &attr.meta {
            // `#[omission]` alone carries no option.
            Meta::Path(_) => {}
            Meta::List(list) => list.parse_nested_meta(|meta| apply_option(&mut options, &meta))?,
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[omission]",
                ));
            }
        }
    }

    Ok(options)
}

fn apply_option(options: &mut ContainerOptions, meta: &ParseNestedMeta<'_>) -> Result<()> {
    if !meta.path.is_ident("opaque") {
        let name = meta
            .path
            .get_ident()
            .map_or_else(|| "?".to_string(), ToString::to_string);
        return Err(meta.error(format!("unknown container option `{name}`; expected `opaque`")));
    }
    if options.opaque {
        return Err(meta.error("duplicate `opaque` option"));
    }
    options.opaque = true;
    Ok(())
}
