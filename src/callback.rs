use crate::{cell::MemoCell, dep::Fingerprint, trace::TraceHook};
use std::rc::Rc;

/// A cheaply clonable callback handle.
///
/// Equality is pointer identity of the underlying allocation, so a handle can
/// be used directly as a fingerprint element: two handles are equal iff they
/// came from the same [`CallbackCell`] evaluation, never because their bodies
/// happen to behave the same.
pub struct Callback<A: 'static, R: 'static = ()>(Rc<dyn Fn(A) -> R>);

impl<A, R> Callback<A, R> {
    pub fn new(f: impl Fn(A) -> R + 'static) -> Self {
        Callback(Rc::new(f))
    }

    pub fn call(&self, arg: A) -> R {
        (self.0)(arg)
    }
}

/// Custom implementation of Clone to avoid putting Clone requirements on A
/// and R.
impl<A, R> Clone for Callback<A, R> {
    fn clone(&self) -> Self {
        Callback(self.0.clone())
    }
}

impl<A, R> PartialEq for Callback<A, R> {
    fn eq(&self, other: &Self) -> bool {
        // Thin data pointers only; trait object vtable pointers are not
        // stable.
        Rc::as_ptr(&self.0).cast::<()>() == Rc::as_ptr(&other.0).cast::<()>()
    }
}

/// One memoized callback site.
///
/// Same caching rule as [`MemoCell`], but what is cached is the handle
/// itself, not an invocation result. As long as the fingerprint matches, every
/// lookup returns the identical allocation, which lets downstream gates skip
/// on reference equality.
pub struct CallbackCell<A: 'static, R: 'static = ()> {
    cell: MemoCell<Callback<A, R>>,
}

impl<A, R> CallbackCell<A, R> {
    pub fn new() -> Self {
        CallbackCell {
            cell: MemoCell::new(),
        }
    }

    pub fn with_trace(trace: TraceHook) -> Self {
        CallbackCell {
            cell: MemoCell::with_trace(trace),
        }
    }

    /// Returns the cached handle while `deps` matches, wrapping `f` into a
    /// fresh handle otherwise. `f` is only moved into an allocation on a
    /// miss.
    pub fn callback(&self, deps: Fingerprint, f: impl Fn(A) -> R + 'static) -> Callback<A, R> {
        self.cell.get(deps, move || Callback::new(f))
    }
}

impl<A, R> Default for CallbackCell<A, R> {
    fn default() -> Self {
        Self::new()
    }
}
