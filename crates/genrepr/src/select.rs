//! Attribute selection: which `(name, value)` pairs of a target are shown.
//!
//! # Example
//!
//! ```
//! use genrepr::{FieldEntry, GenRepr, select_fields};
//!
//! struct Http {
//!     status: u16,
//!     _headers: Vec<String>,
//! }
//!
//! impl GenRepr for Http {
//!     fn type_name() -> &'static str {
//!         "Http"
//!     }
//!
//!     fn public_fields(&self) -> Vec<FieldEntry<'_>> {
//!         vec![
//!             FieldEntry::borrowed("status", &self.status),
//!             FieldEntry::borrowed("_headers", &self._headers),
//!         ]
//!     }
//! }
//!
//! let http = Http { status: 200, _headers: Vec::new() };
//! let names: Vec<_> = select_fields(&http, true)
//!     .unwrap()
//!     .iter()
//!     .map(|f| f.name)
//!     .collect();
//! assert_eq!(names, ["status"]);
//! assert_eq!(http.repr(), "<Http (status=200)>");
//! ```

use indexmap::IndexMap;
use tracing::trace;

use crate::error::ReprError;
use crate::render::{RenderContext, render_object};
use crate::value::ReprValue;

/// Value of a selected field.
pub enum FieldValue<'a> {
    /// Plain field, borrowed from the target.
    Borrowed(&'a dyn ReprValue),
    /// Result of a property getter or a rendering adapter.
    Computed(Box<dyn ReprValue + 'a>),
}

impl FieldValue<'_> {
    pub fn as_value(&self) -> &dyn ReprValue {
        match self {
            Self::Borrowed(value) => *value,
            Self::Computed(value) => &**value,
        }
    }
}

/// A `(name, value)` pair produced for one representation request.
pub struct FieldEntry<'a> {
    pub name: &'static str,
    pub value: FieldValue<'a>,
}

impl<'a> FieldEntry<'a> {
    pub fn borrowed(name: &'static str, value: &'a dyn ReprValue) -> Self {
        Self {
            name,
            value: FieldValue::Borrowed(value),
        }
    }

    pub fn computed(name: &'static str, value: impl ReprValue + 'a) -> Self {
        Self {
            name,
            value: FieldValue::Computed(Box::new(value)),
        }
    }
}

impl std::fmt::Debug for FieldEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = match self.value.as_value().render_repr(&mut RenderContext::new()) {
            Ok(Some(rendered)) => rendered,
            Ok(None) => "<absent>".to_string(),
            Err(err) => format!("<error: {err}>"),
        };
        f.debug_struct("FieldEntry")
            .field("name", &self.name)
            .field("value", &rendered)
            .finish()
    }
}

/// Types whose representation is generated from their public state.
///
/// Usually derived with `#[derive(GenRepr)]` or `#[gen_repr]`, which also
/// implement [`ReprValue`] (so the type nests inside other representations)
/// and `Debug` (backed by [`fmt_repr`](crate::fmt_repr)).
pub trait GenRepr {
    /// Whether computed properties are part of the representation.
    const INCLUDE_PROPERTIES: bool = true;

    /// Display label, the bare type name.
    fn type_name() -> &'static str;

    /// Plain fields in declaration order.
    ///
    /// Entries with a non-public name are filtered out by [`select_fields`],
    /// so implementations may list every field.
    fn public_fields(&self) -> Vec<FieldEntry<'_>>;

    /// Computed properties, evaluated against `self`.
    ///
    /// Only called when properties are included.
    fn public_properties(&self) -> Result<Vec<FieldEntry<'_>>, ReprError> {
        Ok(Vec::new())
    }

    /// The generated representation, or the first property error.
    fn try_repr(&self) -> Result<String, ReprError> {
        render_object(self, &mut RenderContext::new())
    }

    /// The generated representation.
    ///
    /// # Panics
    ///
    /// Panics if a fallible property getter fails. Use [`try_repr`](Self::try_repr)
    /// to handle that case.
    fn repr(&self) -> String {
        match self.try_repr() {
            Ok(repr) => repr,
            Err(err) => panic!("failed to build repr of `{}`: {err}", Self::type_name()),
        }
    }
}

/// Whether `name` is shown: anything not starting with an underscore.
pub fn is_public(name: &str) -> bool {
    !name.starts_with('_')
}

/// Select the public `(name, value)` pairs of `target`.
///
/// Plain fields come first, then properties when `include_properties` is set.
/// A name seen twice keeps its first position and takes the later value, so
/// a child field shadowing a flattened parent field shows up once.
pub fn select_fields<T: GenRepr + ?Sized>(
    target: &T,
    include_properties: bool,
) -> Result<Vec<FieldEntry<'_>>, ReprError> {
    let mut selected: IndexMap<&'static str, FieldValue<'_>> = IndexMap::new();

    for entry in target.public_fields() {
        insert_public(&mut selected, entry);
    }
    if include_properties {
        for entry in target.public_properties()? {
            insert_public(&mut selected, entry);
        }
    }

    Ok(selected
        .into_iter()
        .map(|(name, value)| FieldEntry { name, value })
        .collect())
}

fn insert_public<'a>(selected: &mut IndexMap<&'static str, FieldValue<'a>>, entry: FieldEntry<'a>) {
    if !is_public(entry.name) {
        trace!(field = entry.name, "skipping non-public field");
        return;
    }
    selected.insert(entry.name, entry.value);
}
