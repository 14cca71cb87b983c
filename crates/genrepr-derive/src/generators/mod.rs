//! Code generators for the `GenRepr` derive macro.
//!
//! - `fields`: `public_fields`, the plain attributes in declaration order
//! - `properties`: `public_properties`, flattened parents first, then own getters
//! - `impls`: the `GenRepr`, `ReprValue` and `Debug` impl blocks

mod fields;
mod impls;
mod properties;

pub use fields::generate_public_fields;
pub use impls::generate_impls;
pub use properties::generate_public_properties;
