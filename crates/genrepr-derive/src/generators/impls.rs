//! Impl blocks emitted by `#[derive(GenRepr)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, Ident, PathArguments, Type};

use crate::attrs::{FieldMode, GenReprAttrs};

/// Emit `GenRepr`, `ReprValue` and `Debug` for the struct.
///
/// `body` holds the `public_fields` and `public_properties` methods.
pub fn generate_impls(attrs: &GenReprAttrs, krate: &syn::Path, body: TokenStream) -> TokenStream {
    let ident = &attrs.ident;
    let type_name = attrs.type_name();
    let include_properties = attrs.include_properties();

    let generics = bounded_generics(attrs, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #krate::GenRepr for #ident #ty_generics #where_clause {
            const INCLUDE_PROPERTIES: bool = #include_properties;

            fn type_name() -> &'static str {
                #type_name
            }

            #body
        }

        impl #impl_generics #krate::ReprValue for #ident #ty_generics #where_clause {
            fn render_repr(&self, ctx: &mut #krate::RenderContext) -> #krate::Rendered {
                #krate::render_object(self, ctx).map(::core::option::Option::Some)
            }
        }

        impl #impl_generics ::core::fmt::Debug for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #krate::fmt_repr(self, f)
            }
        }
    }
}

/// Bound the struct's type parameters by what their fields need.
///
/// Parameters used by a shown field get the trait its rendering mode needs:
/// `ReprValue`, `Display` or `Debug`. Bounds go on the parameters, not the
/// field types, so recursive types like `Option<Box<Node<T>>>` stay solvable.
/// Parameters that only appear in absent positions (`PhantomData<T>`, `fn`
/// pointers) stay unbounded. Flattened fields are bounded as a whole.
fn bounded_generics(attrs: &GenReprAttrs, krate: &syn::Path) -> syn::Generics {
    let mut generics = attrs.generics.clone();
    let params: Vec<Ident> = generics.type_params().map(|param| param.ident.clone()).collect();
    if params.is_empty() {
        return generics;
    }

    let mut predicates: Vec<syn::WherePredicate> = Vec::new();
    let mut push = |predicate: syn::WherePredicate| {
        if !predicates.contains(&predicate) {
            predicates.push(predicate);
        }
    };

    for field in attrs.fields() {
        let ty = &field.ty;
        let bound: syn::Path = match field.mode() {
            FieldMode::Hidden => continue,
            FieldMode::Flatten => {
                push(syn::parse_quote!(#ty: #krate::GenRepr));
                continue;
            }
            FieldMode::Display => syn::parse_quote!(::core::fmt::Display),
            FieldMode::Debug => syn::parse_quote!(::core::fmt::Debug),
            FieldMode::Value => syn::parse_quote!(#krate::ReprValue),
        };

        let mut used = Vec::new();
        collect_type_params(ty, &params, &mut used);
        for param in used {
            push(syn::parse_quote!(#param: #bound));
        }
    }

    if !predicates.is_empty() {
        generics.make_where_clause().predicates.extend(predicates);
    }
    generics
}

/// Push every parameter of `params` that `ty` mentions in a rendered position.
fn collect_type_params<'a>(ty: &Type, params: &'a [Ident], used: &mut Vec<&'a Ident>) {
    match ty {
        Type::Path(type_path) => {
            if let Some(qself) = &type_path.qself {
                collect_type_params(&qself.ty, params, used);
            }
            let first = type_path.path.segments.first().map(|segment| &segment.ident);
            if let Some(param) = params.iter().find(|param| Some(*param) == first) {
                if !used.contains(&param) {
                    used.push(param);
                }
            }
            for segment in &type_path.path.segments {
                if segment.ident == "PhantomData" {
                    continue;
                }
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        match arg {
                            GenericArgument::Type(inner) => collect_type_params(inner, params, used),
                            GenericArgument::AssocType(assoc) => {
                                collect_type_params(&assoc.ty, params, used)
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
        Type::Reference(reference) => collect_type_params(&reference.elem, params, used),
        Type::Slice(slice) => collect_type_params(&slice.elem, params, used),
        Type::Array(array) => collect_type_params(&array.elem, params, used),
        Type::Ptr(ptr) => collect_type_params(&ptr.elem, params, used),
        Type::Paren(paren) => collect_type_params(&paren.elem, params, used),
        Type::Group(group) => collect_type_params(&group.elem, params, used),
        Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_type_params(elem, params, used);
            }
        }
        // `fn` pointers render as absent; trait objects carry their own bounds.
        _ => {}
    }
}
