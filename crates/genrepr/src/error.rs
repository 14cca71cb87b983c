use std::error::Error as StdError;

/// Boxed error type accepted from fallible property getters.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure while building a representation.
///
/// Rendering itself never fails; the only fallible step is evaluating a
/// computed property declared with `#[genrepr(property(..., fallible))]`.
/// The first failing getter aborts the whole request, no partial string is
/// produced.
#[derive(Debug, thiserror::Error)]
pub enum ReprError {
    /// A property getter returned an error.
    #[error("property `{property}` of `{owner}` failed")]
    Property {
        /// Type the property is declared on.
        owner: &'static str,
        /// Display name of the property.
        property: &'static str,
        #[source]
        source: BoxError,
    },
}

impl ReprError {
    /// Wrap a getter error. Used by generated code.
    pub fn property(owner: &'static str, property: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Property {
            owner,
            property,
            source: source.into(),
        }
    }

    /// Name of the property that failed.
    pub fn property_name(&self) -> &'static str {
        match self {
            Self::Property { property, .. } => property,
        }
    }
}
