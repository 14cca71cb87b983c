//! Value rendering for generated representations.
//!
//! Every value that can appear in a representation implements [`ReprValue`].
//! The rule applied to a value is picked by its type:
//!
//! - text (`str`, `String`, `char`) is single-quoted, without escaping
//! - mappings render as `{k: v, ...}` in the map's own iteration order
//! - sequences and sets render as `[a, b, ...]` in iteration order
//! - type and callable values (`PhantomData`, `TypeId`, `fn` pointers) are
//!   absent, and the caller drops them
//! - everything else uses its natural literal form, and nested
//!   [`GenRepr`](crate::GenRepr) targets use their own representation
//!
//! Tuples render like sequences. Smart pointers and borrows render as their
//! pointee. `Rc`, `Arc` and `RefCell` take part in cycle detection through the
//! [`RenderContext`].

use std::any::TypeId;
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::BuildHasher;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::error::ReprError;
use crate::render::{Identity, ReprDisplay, RenderContext};

/// Rendered text for a value, or `None` when the value is deliberately absent.
pub type Rendered = Result<Option<String>, ReprError>;

/// Marker for a `RefCell` that is mutably borrowed while being rendered.
pub const BORROWED_MARKER: &str = "<borrowed>";

/// A value that knows how to render itself inside a representation.
///
/// Implementations return `Ok(None)` only for values that must not show up at
/// all (type and callable values). Errors come from property getters of nested
/// targets and are propagated unchanged.
pub trait ReprValue {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered;

    /// Adapter implementing [`Display`](fmt::Display) with this value's rendering.
    fn display_repr(&self) -> ReprDisplay<'_, Self>
    where
        Self: Sized,
    {
        ReprDisplay::new(self)
    }
}

// ============================================================================
// Text
// ============================================================================

fn quote(text: &str) -> String {
    format!("'{text}'")
}

impl ReprValue for str {
    fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
        Ok(Some(quote(self)))
    }
}

impl ReprValue for String {
    fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
        Ok(Some(quote(self)))
    }
}

impl ReprValue for char {
    fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
        Ok(Some(format!("'{self}'")))
    }
}

// ============================================================================
// Natural literal forms
// ============================================================================

macro_rules! impl_repr_value_natural {
    ($($ty:ty),*) => {
        $(
            impl ReprValue for $ty {
                fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
                    Ok(Some(self.to_string()))
                }
            }
        )*
    };
}

impl_repr_value_natural!(bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// `Debug` keeps the fractional part: 12.0 stays "12.0".
macro_rules! impl_repr_value_float {
    ($($ty:ty),*) => {
        $(
            impl ReprValue for $ty {
                fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
                    Ok(Some(format!("{self:?}")))
                }
            }
        )*
    };
}

impl_repr_value_float!(f32, f64);

impl<T: ReprValue> ReprValue for Option<T> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        match self {
            Some(value) => value.render_repr(ctx),
            None => Ok(Some("None".to_string())),
        }
    }
}

// ============================================================================
// Sequences
// ============================================================================

fn render_sequence<'a, T, I>(items: I, ctx: &mut RenderContext) -> Rendered
where
    T: ReprValue + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut parts = Vec::new();
    for item in items {
        match item.render_repr(ctx)? {
            Some(rendered) => parts.push(rendered),
            None => trace!("dropping absent sequence element"),
        }
    }
    Ok(Some(format!("[{}]", parts.join(", "))))
}

impl<T: ReprValue> ReprValue for [T] {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_sequence(self, ctx)
    }
}

impl<T: ReprValue, const N: usize> ReprValue for [T; N] {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_sequence(self, ctx)
    }
}

impl<T: ReprValue> ReprValue for Vec<T> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_sequence(self, ctx)
    }
}

impl<T: ReprValue> ReprValue for VecDeque<T> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_sequence(self, ctx)
    }
}

impl<T: ReprValue> ReprValue for BTreeSet<T> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_sequence(self, ctx)
    }
}

impl<T: ReprValue, S: BuildHasher> ReprValue for HashSet<T, S> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_sequence(self, ctx)
    }
}

impl<T: ReprValue, S: BuildHasher> ReprValue for IndexSet<T, S> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_sequence(self, ctx)
    }
}

// Tuples are heterogeneous sequences: `("Peter", 12)` renders as `['Peter', 12]`.
macro_rules! impl_repr_value_tuple {
    ($(($($name:ident),+)),*) => {
        $(
            impl<$($name: ReprValue),+> ReprValue for ($($name,)+) {
                #[allow(non_snake_case)]
                fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
                    let ($($name,)+) = self;
                    render_sequence([$($name as &dyn ReprValue),+], ctx)
                }
            }
        )*
    };
}

impl_repr_value_tuple!(
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
    (A, B, C, D, E, F, G, H, I),
    (A, B, C, D, E, F, G, H, I, J),
    (A, B, C, D, E, F, G, H, I, J, K),
    (A, B, C, D, E, F, G, H, I, J, K, L)
);

// ============================================================================
// Mappings
// ============================================================================

fn render_mapping<'a, K, V, I>(entries: I, ctx: &mut RenderContext) -> Rendered
where
    K: ReprValue + ?Sized + 'a,
    V: ReprValue + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut parts = Vec::new();
    for (key, value) in entries {
        let key = key.render_repr(ctx)?;
        let value = value.render_repr(ctx)?;
        match (key, value) {
            (Some(key), Some(value)) => parts.push(format!("{key}: {value}")),
            _ => trace!("dropping mapping entry with absent key or value"),
        }
    }
    Ok(Some(format!("{{{}}}", parts.join(", "))))
}

impl<K: ReprValue, V: ReprValue, S: BuildHasher> ReprValue for HashMap<K, V, S> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_mapping(self, ctx)
    }
}

impl<K: ReprValue, V: ReprValue> ReprValue for BTreeMap<K, V> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_mapping(self, ctx)
    }
}

impl<K: ReprValue, V: ReprValue, S: BuildHasher> ReprValue for IndexMap<K, V, S> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        render_mapping(self, ctx)
    }
}

// ============================================================================
// Type and callable values (absent)
// ============================================================================

impl<T: ?Sized> ReprValue for PhantomData<T> {
    fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
        Ok(None)
    }
}

impl ReprValue for TypeId {
    fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
        Ok(None)
    }
}

macro_rules! impl_repr_value_fn_pointer {
    ($(($($arg:ident),*)),*) => {
        $(
            impl<R, $($arg),*> ReprValue for fn($($arg),*) -> R {
                fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
                    Ok(None)
                }
            }
        )*
    };
}

impl_repr_value_fn_pointer!((), (A), (A, B), (A, B, C), (A, B, C, D));

// ============================================================================
// Borrows and smart pointers
// ============================================================================

impl<T: ReprValue + ?Sized> ReprValue for &T {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        (**self).render_repr(ctx)
    }
}

impl<T: ReprValue + ?Sized> ReprValue for &mut T {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        (**self).render_repr(ctx)
    }
}

impl<T: ReprValue + ?Sized> ReprValue for Box<T> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        (**self).render_repr(ctx)
    }
}

impl<B> ReprValue for Cow<'_, B>
where
    B: ReprValue + ToOwned + ?Sized,
{
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        (**self).render_repr(ctx)
    }
}

impl<T: ReprValue + ?Sized> ReprValue for Rc<T> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        let identity = Identity::at::<Self>(Rc::as_ptr(self).cast::<()>() as usize);
        ctx.guarded_value(identity, |ctx| (**self).render_repr(ctx))
    }
}

impl<T: ReprValue + ?Sized> ReprValue for Arc<T> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        let identity = Identity::at::<Self>(Arc::as_ptr(self).cast::<()>() as usize);
        ctx.guarded_value(identity, |ctx| (**self).render_repr(ctx))
    }
}

impl<T: ReprValue + ?Sized> ReprValue for RefCell<T> {
    fn render_repr(&self, ctx: &mut RenderContext) -> Rendered {
        ctx.guarded_value(Identity::of(self), |ctx| match self.try_borrow() {
            Ok(value) => value.render_repr(ctx),
            Err(_) => Ok(Some(BORROWED_MARKER.to_string())),
        })
    }
}

// ============================================================================
// Adapters for values without a generated representation
// ============================================================================

/// Renders the wrapped value with its [`Display`](fmt::Display) form, unquoted.
///
/// Generated for fields marked `#[genrepr(display)]`.
pub struct AsDisplay<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Display + ?Sized> ReprValue for AsDisplay<'_, T> {
    fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
        Ok(Some(self.0.to_string()))
    }
}

/// Renders the wrapped value with its [`Debug`](fmt::Debug) form.
///
/// Generated for fields marked `#[genrepr(debug)]`.
pub struct AsDebug<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Debug + ?Sized> ReprValue for AsDebug<'_, T> {
    fn render_repr(&self, _ctx: &mut RenderContext) -> Rendered {
        Ok(Some(format!("{:?}", self.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn render(value: &dyn ReprValue) -> Option<String> {
        value
            .render_repr(&mut RenderContext::new())
            .expect("plain values never fail")
    }

    #[rstest]
    #[case::string(Box::new("String".to_string()), "'String'")]
    #[case::str_slice(Box::new("Unicode ✓"), "'Unicode ✓'")]
    #[case::inner_quote(Box::new("it's"), "'it's'")]
    #[case::char(Box::new('x'), "'x'")]
    #[case::int(Box::new(42_i32), "42")]
    #[case::negative(Box::new(-7_i64), "-7")]
    #[case::bool(Box::new(false), "false")]
    #[case::whole_float(Box::new(12.0_f64), "12.0")]
    #[case::float(Box::new(36.7_f64), "36.7")]
    #[case::none(Box::new(None::<i32>), "None")]
    #[case::some(Box::new(Some("x".to_string())), "'x'")]
    fn renders_scalars(#[case] value: Box<dyn ReprValue>, #[case] expected: &str) {
        assert_eq!(render(&value).as_deref(), Some(expected));
    }

    #[test]
    fn renders_mixed_sequence_in_order() {
        let names: Vec<Box<dyn ReprValue>> = vec![Box::new("Peter"), Box::new(12)];
        assert_eq!(render(&names).as_deref(), Some("['Peter', 12]"));
    }

    #[rstest]
    #[case::single(Box::new((1_u8,)), "[1]")]
    #[case::pair(Box::new(("Peter", 12)), "['Peter', 12]")]
    #[case::absent_dropped(Box::new((1.5_f64, PhantomData::<u8>, None::<u8>)), "[1.5, None]")]
    #[case::nested(Box::new((vec![(1, 'a')], "x".to_string())), "[[[1, 'a']], 'x']")]
    fn renders_tuples_as_sequences(#[case] value: Box<dyn ReprValue>, #[case] expected: &str) {
        assert_eq!(render(&value).as_deref(), Some(expected));
    }

    #[test]
    fn renders_twelve_element_tuple() {
        let wide = (1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12);
        assert_eq!(
            render(&wide).as_deref(),
            Some("[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]")
        );
    }

    #[test]
    fn renders_empty_containers() {
        assert_eq!(render(&Vec::<i32>::new()).as_deref(), Some("[]"));
        assert_eq!(render(&BTreeMap::<String, i32>::new()).as_deref(), Some("{}"));
        assert_eq!(render(&[0_u8; 0]).as_deref(), Some("[]"));
    }

    #[test]
    fn renders_index_map_in_insertion_order() {
        let mut people: IndexMap<&str, f64> = IndexMap::new();
        people.insert("Peter", 12.5);
        people.insert("Warren", 6.0);
        people.insert("Glen", 36.7);
        assert_eq!(
            render(&people).as_deref(),
            Some("{'Peter': 12.5, 'Warren': 6.0, 'Glen': 36.7}")
        );
    }

    #[test]
    fn renders_nested_containers() {
        let mut groups: BTreeMap<&str, Vec<Option<u8>>> = BTreeMap::new();
        groups.insert("a", vec![Some(1), None]);
        groups.insert("b", vec![]);
        let deque: VecDeque<_> = [groups].into_iter().collect();
        assert_eq!(
            render(&deque).as_deref(),
            Some("[{'a': [1, None], 'b': []}]")
        );
    }

    #[test]
    fn type_and_callable_values_are_absent() {
        fn noop() -> u8 {
            0
        }
        let pointer: fn() -> u8 = noop;
        let binary: fn(i32, i32) -> i32 = |a, b| a + b;

        assert_eq!(render(&PhantomData::<String>), None);
        assert_eq!(render(&TypeId::of::<String>()), None);
        assert_eq!(render(&pointer), None);
        assert_eq!(render(&binary), None);
    }

    #[test]
    fn absent_elements_are_dropped_from_containers() {
        let values: Vec<Box<dyn ReprValue>> = vec![Box::new(1), Box::new(PhantomData::<u8>), Box::new(2)];
        assert_eq!(render(&values).as_deref(), Some("[1, 2]"));

        let mut map: IndexMap<&str, Box<dyn ReprValue>> = IndexMap::new();
        map.insert("kept", Box::new(true));
        map.insert("type", Box::new(TypeId::of::<u8>()));
        assert_eq!(render(&map).as_deref(), Some("{'kept': true}"));
    }

    #[test]
    fn pointers_are_transparent() {
        let shared = Rc::new(RefCell::new(vec!["a".to_string()]));
        assert_eq!(render(&shared).as_deref(), Some("['a']"));
        assert_eq!(render(&Arc::new(3_u16)).as_deref(), Some("3"));
        assert_eq!(render(&Cow::Borrowed("cow")).as_deref(), Some("'cow'"));
        assert_eq!(render(&Box::<str>::from("boxed")).as_deref(), Some("'boxed'"));
    }

    #[test]
    fn mutably_borrowed_cell_renders_marker() {
        let cell = RefCell::new(5);
        let _guard = cell.borrow_mut();
        assert_eq!(render(&cell).as_deref(), Some(BORROWED_MARKER));
    }

    #[test]
    fn adapters_use_std_formatting() {
        let path = std::path::Path::new("/tmp/x");
        assert_eq!(render(&AsDebug(path)).as_deref(), Some("\"/tmp/x\""));
        assert_eq!(render(&AsDisplay(&path.display())).as_deref(), Some("/tmp/x"));
    }
}
