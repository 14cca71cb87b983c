//! Shared entry point for `#[derive(GenRepr)]`.

use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use syn::DeriveInput;

use crate::{attrs, generators};

pub(crate) fn derive(input: &DeriveInput, krate: &syn::Path) -> syn::Result<TokenStream> {
    let attrs = attrs::GenReprAttrs::from_derive_input(input)
        .map_err(|e| syn::Error::new_spanned(&input.ident, e.to_string()))?;

    let validation_errors = attrs.validate();
    if !validation_errors.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            validation_errors.join("; "),
        ));
    }

    let mut body = generators::generate_public_fields(&attrs, krate);
    body.extend(generators::generate_public_properties(&attrs, krate)?);

    Ok(generators::generate_impls(&attrs, krate, body))
}
