use crate::{
    dep::Fingerprint,
    trace::{self, Decision, TraceHook},
};
use std::{
    cell::{Ref, RefCell},
    convert::Infallible,
};

/// One memoized computation site.
///
/// A cell holds the last fingerprint it evaluated under together with the
/// result of that evaluation. A lookup re-runs the compute function only when
/// the new fingerprint fails to match the stored one, element by element. The
/// comparison is shallow and keeps no history: a fingerprint sequence A, B, A
/// evaluates three times.
pub struct MemoCell<T: 'static> {
    entry: RefCell<Option<Entry<T>>>,
    trace: Option<TraceHook>,
}

struct Entry<T> {
    deps: Fingerprint,
    value: T,
}

impl<T> MemoCell<T> {
    pub fn new() -> Self {
        MemoCell {
            entry: RefCell::new(None),
            trace: None,
        }
    }

    pub fn with_trace(trace: TraceHook) -> Self {
        MemoCell {
            entry: RefCell::new(None),
            trace: Some(trace),
        }
    }

    /// Returns the memoized result, recomputing it if `deps` does not match
    /// the fingerprint stored by the previous call.
    pub fn value(&self, deps: Fingerprint, compute: impl FnOnce() -> T) -> Ref<T> {
        match self.try_value::<Infallible>(deps, || Ok(compute())) {
            Ok(value) => value,
            Err(e) => match e {},
        }
    }

    /// Clone-out convenience over [`MemoCell::value`].
    pub fn get(&self, deps: Fingerprint, compute: impl FnOnce() -> T) -> T
    where
        T: Clone,
    {
        self.value(deps, compute).clone()
    }

    /// Fallible lookup. A failing `compute` propagates its error and leaves
    /// the entry in its pre-call state, so a later lookup under the previously
    /// stored fingerprint still hits.
    pub fn try_value<E>(
        &self,
        deps: Fingerprint,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<Ref<T>, E> {
        let hit = match &*self.entry.borrow() {
            Some(entry) => entry.deps.matches(&deps),
            None => false,
        };

        if hit {
            trace::emit(&self.trace, Decision::Hit);
        } else {
            trace::emit(&self.trace, Decision::Miss);
            // No borrow is held here, so `compute` may freely resolve other
            // cells.
            let value = compute()?;
            *self.entry.borrow_mut() = Some(Entry { deps, value });
        }

        let r = self.entry.borrow();
        Ok(Ref::map(r, |entry| &entry.as_ref().unwrap().value))
    }

    #[cfg(test)]
    pub fn is_primed(&self) -> bool {
        self.entry.borrow().is_some()
    }
}

impl<T> Default for MemoCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
