//! Generated debug representations built from a type's public state.
//!
//! A representation looks like `<TypeName (field=value, ...)>`. Fields are the
//! type's public fields (names not starting with `_`) in declaration order,
//! followed by its declared computed properties. Values render recursively:
//! text is single-quoted, sequences use `[...]`, mappings use `{k: v}`, nested
//! targets show their own representation, and type or callable values are
//! left out.
//!
//! # Example
//!
//! ```
//! use genrepr::{GenRepr, IndexMap, gen_repr};
//!
//! #[gen_repr]
//! struct Person {
//!     name: String,
//! }
//!
//! #[gen_repr(include_properties = false)]
//! #[genrepr(property(name = "headcount"))]
//! struct Team {
//!     lead: Person,
//!     scores: IndexMap<String, f64>,
//!     _cache: Vec<u8>,
//! }
//!
//! impl Team {
//!     fn headcount(&self) -> usize {
//!         1
//!     }
//! }
//!
//! let mut scores = IndexMap::new();
//! scores.insert("Peter".to_string(), 12.0);
//! let team = Team {
//!     lead: Person { name: "Glen".into() },
//!     scores,
//!     _cache: Vec::new(),
//! };
//! assert_eq!(team.repr(), "<Team (lead=<Person (name='Glen')>, scores={'Peter': 12.0})>");
//! assert_eq!(format!("{team:?}"), team.repr());
//! ```
//!
//! # Features
//!
//! - `derive` (default): re-exports `#[derive(GenRepr)]` and `#[gen_repr]`.

extern crate self as genrepr;

pub mod error;
pub mod render;
pub mod select;
pub mod value;

pub use error::{BoxError, ReprError};
pub use render::{
    CYCLE_MARKER, Identity, RenderContext, ReprDisplay, fmt_repr, render, render_object,
};
pub use select::{FieldEntry, FieldValue, GenRepr, is_public, select_fields};
pub use value::{AsDebug, AsDisplay, BORROWED_MARKER, ReprValue, Rendered};

pub use indexmap::{IndexMap, IndexSet};

#[cfg(feature = "derive")]
pub use genrepr_derive::{GenRepr, gen_repr};
