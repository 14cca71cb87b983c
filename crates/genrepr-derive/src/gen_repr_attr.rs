//! Implementation of the `#[gen_repr]` attribute macro.
//!
//! Rewrites a struct to derive `GenRepr` and forwards the macro's options as a
//! `#[genrepr(...)]` container attribute.

use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Attribute, DeriveInput, Path, Token};

/// Options accepted by `#[gen_repr(...)]`.
#[derive(Debug, Default)]
pub(crate) struct GenReprArgs {
    pub include_properties: Option<bool>,
}

impl GenReprArgs {
    pub(crate) fn parse(args: TokenStream) -> syn::Result<Self> {
        let mut parsed = Self::default();
        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("include_properties") {
                let lit: syn::LitBool = meta.value()?.parse()?;
                parsed.include_properties = Some(lit.value);
                Ok(())
            } else {
                Err(meta.error("unknown `gen_repr` option; expected `include_properties`"))
            }
        });
        syn::parse::Parser::parse2(parser, args)?;
        Ok(parsed)
    }
}

/// Expand `#[gen_repr]`.
///
/// 1. Merges `GenRepr` into an existing `#[derive(...)]`, or adds one
/// 2. Moves that derive ahead of the other attributes so `#[genrepr]` helpers
///    follow it
/// 3. Adds `#[genrepr(include_properties = ...)]` when the option is given
pub(crate) fn expand(args: TokenStream, item: TokenStream, krate: &Path) -> syn::Result<TokenStream> {
    let args = GenReprArgs::parse(args)?;
    let mut input: DeriveInput = syn::parse2(item)?;

    let mut derives: Punctuated<Path, Token![,]> = Punctuated::new();
    let mut others: Vec<Attribute> = Vec::new();
    for attr in input.attrs.drain(..) {
        if attr.path().is_ident("derive") {
            let paths = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
            derives.extend(paths);
        } else {
            others.push(attr);
        }
    }

    if let Some(debug) = derives.iter().find(|path| last_segment_is(path, "Debug")) {
        return Err(syn::Error::new_spanned(
            debug,
            "`#[gen_repr]` implements `Debug` with the generated representation; remove `Debug` from the derive list",
        ));
    }
    if !derives.iter().any(|path| last_segment_is(path, "GenRepr")) {
        derives.push(syn::parse_quote!(#krate::GenRepr));
    }

    let mut attrs: Vec<Attribute> = vec![syn::parse_quote!(#[derive(#derives)])];
    if let Some(include_properties) = args.include_properties {
        attrs.push(syn::parse_quote!(#[genrepr(include_properties = #include_properties)]));
    }
    attrs.extend(others);
    input.attrs = attrs;

    Ok(quote!(#input))
}

fn last_segment_is(path: &Path, name: &str) -> bool {
    path.segments
        .last()
        .map(|segment| segment.ident == name)
        .unwrap_or(false)
}
