//! Top-level formatting of targets: `<TypeName (field=value, ...)>`.

use std::fmt;

use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use crate::error::ReprError;
use crate::select::{GenRepr, select_fields};
use crate::value::{ReprValue, Rendered};

/// Rendered in place of a value that is already being rendered further up the
/// stack.
pub const CYCLE_MARKER: &str = "<...>";

/// Address plus type of a value on the render stack.
///
/// The type keeps apart values that share an address: a struct and its first
/// field, or an `Rc` allocation and the `RefCell` stored in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    address: usize,
    type_name: &'static str,
}

impl Identity {
    /// Identity of the value `value` points at.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self::at::<T>(std::ptr::from_ref(value).cast::<()>() as usize)
    }

    /// Identity of a `T` handle to the value at `address`.
    pub fn at<T: ?Sized>(address: usize) -> Self {
        Self {
            address,
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Per-request rendering state.
///
/// Holds the identities of the objects, cells and shared pointers currently
/// being rendered on this call stack. Nothing else is kept between values, so
/// a context can be reused for several top-level values in sequence.
#[derive(Debug, Default)]
pub struct RenderContext {
    active: IndexSet<Identity>,
}

impl RenderContext {
    /// An empty context, with nothing on the render stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of values currently on the render stack.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// Run `render` with `identity` pushed on the stack.
    ///
    /// Returns `None` without calling `render` when `identity` is already on
    /// the stack.
    pub fn guarded<R, F>(&mut self, identity: Identity, render: F) -> Option<R>
    where
        F: FnOnce(&mut Self) -> R,
    {
        if !self.active.insert(identity) {
            debug!(
                type_name = identity.type_name,
                depth = self.depth(),
                "cycle detected, cutting recursion"
            );
            return None;
        }
        let rendered = render(self);
        self.active.pop();
        Some(rendered)
    }

    /// [`guarded`](Self::guarded) for value renderers: a revisit renders
    /// [`CYCLE_MARKER`].
    pub fn guarded_value<F>(&mut self, identity: Identity, render: F) -> Rendered
    where
        F: FnOnce(&mut Self) -> Rendered,
    {
        self.guarded(identity, render)
            .unwrap_or_else(|| Ok(Some(CYCLE_MARKER.to_string())))
    }
}

/// Build the full representation of `target`.
///
/// Fields come from [`select_fields`] with the type's own
/// [`GenRepr::INCLUDE_PROPERTIES`]; fields whose value renders as absent are
/// left out. A target reached again while it is still being rendered, through
/// a reference inside a `RefCell` for instance, renders as [`CYCLE_MARKER`].
#[tracing::instrument(
    name = "genrepr.render_object",
    level = "trace",
    skip_all,
    fields(type_name = T::type_name())
)]
pub fn render_object<T: GenRepr + ?Sized>(
    target: &T,
    ctx: &mut RenderContext,
) -> Result<String, ReprError> {
    ctx.guarded(Identity::of(target), |ctx| render_fields(target, ctx))
        .unwrap_or_else(|| Ok(CYCLE_MARKER.to_string()))
}

fn render_fields<T: GenRepr + ?Sized>(
    target: &T,
    ctx: &mut RenderContext,
) -> Result<String, ReprError> {
    let fields = select_fields(target, T::INCLUDE_PROPERTIES)?;

    let mut segments = Vec::with_capacity(fields.len());
    for field in &fields {
        match field.value.as_value().render_repr(ctx)? {
            Some(rendered) => segments.push(format!("{}={}", field.name, rendered)),
            None => trace!(field = field.name, "dropping field with absent rendering"),
        }
    }

    Ok(format!("<{} ({})>", T::type_name(), segments.join(", ")))
}

/// Render any value with a fresh context.
///
/// Returns `Ok(None)` for values that are absent by rule (type and callable
/// values).
pub fn render<T: ReprValue + ?Sized>(value: &T) -> Rendered {
    value.render_repr(&mut RenderContext::new())
}

/// `Debug` body for derived types.
///
/// A failing property getter is logged and surfaces as [`fmt::Error`].
pub fn fmt_repr<T: GenRepr + ?Sized>(target: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match render_object(target, &mut RenderContext::new()) {
        Ok(repr) => f.write_str(&repr),
        Err(err) => {
            warn!(type_name = T::type_name(), error = %err, "generated repr failed");
            Err(fmt::Error)
        }
    }
}

/// [`Display`](fmt::Display) adapter over a value's rendering.
///
/// Absent values display as the empty string.
pub struct ReprDisplay<'a, T: ?Sized> {
    value: &'a T,
}

impl<'a, T: ?Sized> ReprDisplay<'a, T> {
    pub fn new(value: &'a T) -> Self {
        Self { value }
    }
}

impl<T: ReprValue + ?Sized> fmt::Display for ReprDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match render(self.value) {
            Ok(Some(rendered)) => f.write_str(&rendered),
            Ok(None) => Ok(()),
            Err(err) => {
                warn!(error = %err, "value repr failed");
                Err(fmt::Error)
            }
        }
    }
}
