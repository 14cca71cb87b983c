//! Attribute parsing for `#[derive(GenRepr)]` using darling.
//!
//! Container and field options both live under `#[genrepr(...)]`.

use darling::{FromDeriveInput, FromField, FromMeta};
use syn::ext::IdentExt;
use syn::{Ident, Type};

/// A computed property shown after the plain fields.
///
/// ```ignore
/// #[derive(GenRepr)]
/// #[genrepr(property(name = "age"))]
/// #[genrepr(property(name = "balance", getter = "current_balance", fallible))]
/// pub struct Account {
///     _age: u32,
/// }
/// ```
#[derive(Debug, Clone, FromMeta)]
pub struct PropertyAttrs {
    /// Name shown in the representation.
    pub name: String,
    /// Method to call; defaults to `name`.
    #[darling(default)]
    pub getter: Option<String>,
    /// The getter returns `Result<T, E>`; `Err` aborts the representation.
    #[darling(default)]
    pub fallible: bool,
}

/// Container-level attributes for `#[derive(GenRepr)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(genrepr), supports(struct_named, struct_unit))]
pub struct GenReprAttrs {
    pub ident: Ident,
    pub generics: syn::Generics,
    pub data: darling::ast::Data<(), FieldAttrs>,

    /// Whether properties are shown; `true` when unset.
    #[darling(default)]
    pub include_properties: Option<bool>,

    #[darling(default, multiple)]
    pub property: Vec<PropertyAttrs>,
}

/// Field-level attributes for `#[derive(GenRepr)]`.
#[derive(Debug, Clone, FromField)]
#[darling(attributes(genrepr))]
pub struct FieldAttrs {
    pub ident: Option<Ident>,
    pub ty: Type,

    /// Never show this field.
    #[darling(default)]
    pub skip: bool,

    /// Splice the field's own selected fields and properties in place, the
    /// way inherited attributes show up on a subclass instance.
    #[darling(default)]
    pub flatten: bool,

    /// Render with `Display` instead of `ReprValue`.
    #[darling(default)]
    pub display: bool,

    /// Render with `Debug` instead of `ReprValue`.
    #[darling(default)]
    pub debug: bool,
}

/// How a field contributes to `public_fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    Hidden,
    Flatten,
    Display,
    Debug,
    Value,
}

impl GenReprAttrs {
    pub fn type_name(&self) -> String {
        self.ident.unraw().to_string()
    }

    pub fn include_properties(&self) -> bool {
        self.include_properties.unwrap_or(true)
    }

    /// Returns an iterator over the struct fields (empty for unit structs).
    pub fn fields(&self) -> impl Iterator<Item = &FieldAttrs> {
        match &self.data {
            darling::ast::Data::Struct(fields) => fields.iter(),
            _ => unreachable!("GenReprAttrs only supports named and unit structs"),
        }
    }

    /// Validate field and property options.
    ///
    /// Returns every problem found, or an empty vec.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for field in self.fields() {
            errors.extend(field.validate());
        }

        let mut seen: Vec<&str> = Vec::new();
        for prop in &self.property {
            if seen.contains(&prop.name.as_str()) {
                errors.push(format!("duplicate property `{}`", prop.name));
            }
            seen.push(&prop.name);

            if prop.getter_ident().is_none() {
                errors.push(format!(
                    "property `{}`: getter `{}` is not a method name",
                    prop.name,
                    prop.getter_name()
                ));
            }
        }

        errors
    }
}

impl FieldAttrs {
    /// The field name as shown, with any `r#` prefix removed.
    pub fn name(&self) -> String {
        self.ident
            .as_ref()
            .map(|ident| ident.unraw().to_string())
            .unwrap_or_default()
    }

    pub fn mode(&self) -> FieldMode {
        if self.skip {
            FieldMode::Hidden
        } else if self.flatten {
            // Flattened fields splice in their contents; their own name is
            // never shown, so the underscore rule does not apply to it.
            FieldMode::Flatten
        } else if self.name().starts_with('_') {
            FieldMode::Hidden
        } else if self.display {
            FieldMode::Display
        } else if self.debug {
            FieldMode::Debug
        } else {
            FieldMode::Value
        }
    }

    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.display && self.debug {
            errors.push(format!(
                "field `{}`: `display` and `debug` are mutually exclusive",
                self.name()
            ));
        }
        if self.flatten && (self.display || self.debug || self.skip) {
            errors.push(format!(
                "field `{}`: `flatten` cannot be combined with other field options",
                self.name()
            ));
        }
        errors
    }
}

impl PropertyAttrs {
    pub fn getter_name(&self) -> &str {
        self.getter.as_deref().unwrap_or(&self.name)
    }

    pub fn getter_ident(&self) -> Option<Ident> {
        syn::parse_str::<Ident>(self.getter_name()).ok()
    }

    pub fn is_public(&self) -> bool {
        !self.name.starts_with('_')
    }
}
