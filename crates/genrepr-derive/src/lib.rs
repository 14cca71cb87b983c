//! Derive macros for `genrepr`.
//!
//! - `#[gen_repr]` / `#[gen_repr(include_properties = false)]` - attribute
//!   macro that injects `#[derive(GenRepr)]`
//! - `#[derive(GenRepr)]` - implements `GenRepr`, `ReprValue` and `Debug`
//!
//! Both are re-exported from `genrepr`; depend on that crate rather than this
//! one, since the generated code refers to its runtime items.

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod attrs;
mod derive;
mod gen_repr_attr;
mod generators;
mod runtime_path;

/// Attribute macro attaching a generated representation to a struct.
///
/// # Example
///
/// ```ignore
/// #[gen_repr(include_properties = false)]
/// #[derive(Clone)]
/// pub struct Address {
///     pub street: String,
///     _geo: Option<(f64, f64)>,
/// }
/// ```
///
/// Expands to:
///
/// ```ignore
/// #[derive(Clone, ::genrepr::GenRepr)]
/// #[genrepr(include_properties = false)]
/// pub struct Address {
///     pub street: String,
///     _geo: Option<(f64, f64)>,
/// }
/// ```
///
/// `include_properties` is the only option. `Debug` must not be derived as
/// well, the generated representation is the `Debug` output.
#[proc_macro_attribute]
pub fn gen_repr(attr: TokenStream, item: TokenStream) -> TokenStream {
    let expanded = runtime_path::resolve_genrepr_path()
        .and_then(|krate| gen_repr_attr::expand(attr.into(), item.into(), &krate));

    match expanded {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive macro for generated representations.
///
/// The output is `<TypeName (field=value, ...)>` built from public fields (not
/// starting with `_`) in declaration order, followed by declared properties.
///
/// # Container Attributes
///
/// - `#[genrepr(include_properties = false)]` - Leave properties out
/// - `#[genrepr(property(name = "...", getter = "...", fallible))]` - Show the
///   result of `self.getter()` under `name`; `fallible` getters return
///   `Result` and their error aborts the representation
///
/// # Field Attributes
///
/// - `#[genrepr(skip)]` - Never show the field
/// - `#[genrepr(flatten)]` - Show the field's own fields and properties in place
/// - `#[genrepr(display)]` - Render with `Display`
/// - `#[genrepr(debug)]` - Render with `Debug`
#[proc_macro_derive(GenRepr, attributes(genrepr))]
pub fn derive_gen_repr(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    match runtime_path::resolve_genrepr_path().and_then(|krate| derive::derive(&input, &krate)) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
