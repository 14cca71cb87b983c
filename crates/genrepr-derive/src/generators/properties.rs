//! `public_properties` generation.
//!
//! Properties of flattened parents come first, in field order, followed by
//! the type's own `#[genrepr(property(...))]` declarations in the order they
//! are written. Non-public property names are never evaluated.

use proc_macro2::TokenStream;
use quote::quote;

use crate::attrs::{FieldMode, GenReprAttrs, PropertyAttrs};

pub fn generate_public_properties(attrs: &GenReprAttrs, krate: &syn::Path) -> syn::Result<TokenStream> {
    let inherited: Vec<TokenStream> = attrs
        .fields()
        .filter(|field| field.mode() == FieldMode::Flatten)
        .filter_map(|field| field.ident.as_ref())
        .map(|ident| {
            quote! {
                properties.extend(#krate::GenRepr::public_properties(&self.#ident)?);
            }
        })
        .collect();

    let type_name = attrs.type_name();
    let own = attrs
        .property
        .iter()
        .filter(|prop| prop.is_public())
        .map(|prop| generate_property_entry(prop, &type_name, krate))
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        fn public_properties(
            &self,
        ) -> ::core::result::Result<::std::vec::Vec<#krate::FieldEntry<'_>>, #krate::ReprError> {
            #[allow(unused_mut)]
            let mut properties = ::std::vec::Vec::new();
            #(#inherited)*
            #(#own)*
            ::core::result::Result::Ok(properties)
        }
    })
}

fn generate_property_entry(
    prop: &PropertyAttrs,
    type_name: &str,
    krate: &syn::Path,
) -> syn::Result<TokenStream> {
    let getter = prop.getter_ident().ok_or_else(|| {
        syn::Error::new(
            proc_macro2::Span::call_site(),
            format!("property `{}`: getter `{}` is not a method name", prop.name, prop.getter_name()),
        )
    })?;
    let name_lit = syn::LitStr::new(&prop.name, proc_macro2::Span::call_site());

    if prop.fallible {
        Ok(quote! {
            properties.push(#krate::FieldEntry::computed(
                #name_lit,
                self.#getter()
                    .map_err(|err| #krate::ReprError::property(#type_name, #name_lit, err))?,
            ));
        })
    } else {
        Ok(quote! {
            properties.push(#krate::FieldEntry::computed(#name_lit, self.#getter()));
        })
    }
}
