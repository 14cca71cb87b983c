//! `public_fields` generation.

use proc_macro2::TokenStream;
use quote::quote;

use crate::attrs::{FieldAttrs, FieldMode, GenReprAttrs};

pub fn generate_public_fields(attrs: &GenReprAttrs, krate: &syn::Path) -> TokenStream {
    let pushes: Vec<TokenStream> = attrs
        .fields()
        .filter_map(|field| generate_field_entry(field, krate))
        .collect();

    quote! {
        fn public_fields(&self) -> ::std::vec::Vec<#krate::FieldEntry<'_>> {
            #[allow(unused_mut)]
            let mut fields = ::std::vec::Vec::new();
            #(#pushes)*
            fields
        }
    }
}

fn generate_field_entry(field: &FieldAttrs, krate: &syn::Path) -> Option<TokenStream> {
    let ident = field.ident.as_ref()?;
    let name_lit = syn::LitStr::new(&field.name(), ident.span());

    let tokens = match field.mode() {
        FieldMode::Hidden => return None,
        FieldMode::Flatten => quote! {
            fields.extend(#krate::GenRepr::public_fields(&self.#ident));
        },
        FieldMode::Display => quote! {
            fields.push(#krate::FieldEntry::computed(#name_lit, #krate::AsDisplay(&self.#ident)));
        },
        FieldMode::Debug => quote! {
            fields.push(#krate::FieldEntry::computed(#name_lit, #krate::AsDebug(&self.#ident)));
        },
        FieldMode::Value => quote! {
            fields.push(#krate::FieldEntry::borrowed(#name_lit, &self.#ident));
        },
    };
    Some(tokens)
}
