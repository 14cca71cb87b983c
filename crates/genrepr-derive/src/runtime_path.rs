use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::Span;

/// Path generated code uses to reach the runtime crate from the calling package.
pub(crate) fn resolve_genrepr_path() -> syn::Result<syn::Path> {
    let found = crate_name("genrepr").map_err(|err| {
        syn::Error::new(
            Span::call_site(),
            format!("`genrepr` is not a dependency of this package ({err})"),
        )
    })?;

    let ident = match found {
        // genrepr's own tests and doctests; the library aliases itself.
        FoundCrate::Itself => syn::Ident::new("genrepr", Span::call_site()),
        FoundCrate::Name(renamed) => syn::Ident::new(&renamed.replace('-', "_"), Span::call_site()),
    };
    Ok(syn::parse_quote!(::#ident))
}
