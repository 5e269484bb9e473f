use std::{any::Any, rc::Rc};

/// A single dependency inside a [`Fingerprint`].
///
/// Deps come in two flavors: a *value* dep compares by `PartialEq`, a *handle*
/// dep compares by pointer identity of the shared allocation. Either way the
/// comparison is shallow. A handle whose interior is mutated in place still
/// compares equal to itself, which is the intended contract, not a defect.
#[derive(Clone)]
pub struct Dep(Inner);

#[derive(Clone)]
enum Inner {
    Value {
        value: Rc<dyn Any>,
        eq: fn(&dyn Any, &dyn Any) -> bool,
    },
    Handle(Rc<dyn Any>),
}

impl Dep {
    /// A dep compared by value. Comparing against a dep of a different
    /// concrete type is `false`, never a panic.
    pub fn value<T>(value: T) -> Self
    where
        T: PartialEq + 'static,
    {
        Dep(Inner::Value {
            value: Rc::new(value),
            eq: |a, b| match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        })
    }

    /// A dep compared by identity of the `Rc` allocation.
    pub fn handle<T: 'static>(handle: Rc<T>) -> Self {
        Dep(Inner::Handle(handle))
    }

    pub(crate) fn shallow_eq(&self, other: &Dep) -> bool {
        match (&self.0, &other.0) {
            (Inner::Value { value: a, eq }, Inner::Value { value: b, .. }) => eq(&**a, &**b),
            (Inner::Handle(a), Inner::Handle(b)) => {
                // Can't compare trait ptrs directly, their vtable pointer is
                // not stable. Compare the thin data pointers.
                Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
            }
            _ => false,
        }
    }
}

/// An ordered sequence of [`Dep`]s representing the inputs an evaluation
/// depends on.
///
/// Two fingerprints match iff they have the same length and every pair of
/// elements is shallowly equal. The empty fingerprint matches only the empty
/// fingerprint, so a cell keyed on it never recomputes after its first
/// evaluation.
#[derive(Clone, Default)]
pub struct Fingerprint(Vec<Dep>);

impl Fingerprint {
    pub fn new(deps: Vec<Dep>) -> Self {
        Fingerprint(deps)
    }

    pub fn empty() -> Self {
        Fingerprint(Vec::new())
    }

    pub fn matches(&self, other: &Fingerprint) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(&other.0).all(|(a, b)| a.shallow_eq(b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl From<Vec<Dep>> for Fingerprint {
    fn from(deps: Vec<Dep>) -> Self {
        Fingerprint(deps)
    }
}

impl FromIterator<Dep> for Fingerprint {
    fn from_iter<I: IntoIterator<Item = Dep>>(iter: I) -> Self {
        Fingerprint(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;

    #[test]
    fn values_compare_by_equality() {
        let a = Fingerprint::new(vec![Dep::value(1), Dep::value("x")]);
        let b = Fingerprint::new(vec![Dep::value(1), Dep::value("x")]);
        let c = Fingerprint::new(vec![Dep::value(1), Dep::value("y")]);
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }

    #[test]
    fn length_mismatch_never_matches() {
        let a = Fingerprint::new(vec![Dep::value(1)]);
        let b = Fingerprint::new(vec![Dep::value(1), Dep::value(2)]);
        assert!(!a.matches(&b));
        assert!(!b.matches(&a));
    }

    #[test]
    fn empty_matches_only_empty() {
        assert!(Fingerprint::empty().matches(&Fingerprint::empty()));
        let one = Fingerprint::new(vec![Dep::value(0)]);
        assert!(!Fingerprint::empty().matches(&one));
    }

    #[test]
    fn differing_value_types_are_unequal() {
        let a = Fingerprint::new(vec![Dep::value(1u32)]);
        let b = Fingerprint::new(vec![Dep::value(1i64)]);
        assert!(!a.matches(&b));
    }

    #[test]
    fn handles_compare_by_identity() {
        let x = Rc::new(vec!["Apple", "Banana"]);
        let y = Rc::new(vec!["Apple", "Banana"]);
        let same = Fingerprint::new(vec![Dep::handle(x.clone())]);
        let also_x = Fingerprint::new(vec![Dep::handle(x)]);
        let other = Fingerprint::new(vec![Dep::handle(y)]);
        assert!(same.matches(&also_x));
        // Equal contents, distinct allocations.
        assert!(!same.matches(&other));
    }

    #[test]
    fn interior_mutation_is_invisible() {
        let items = Rc::new(RefCell::new(vec!["Apple"]));
        let before = Fingerprint::new(vec![Dep::handle(items.clone())]);
        items.borrow_mut().push("Banana");
        let after = Fingerprint::new(vec![Dep::handle(items)]);
        assert!(before.matches(&after));
    }

    proptest! {
        #[test]
        fn matching_mirrors_vec_equality(
            a in proptest::collection::vec(any::<i32>(), 0..8),
            b in proptest::collection::vec(any::<i32>(), 0..8),
        ) {
            let fa: Fingerprint = a.iter().map(|v| Dep::value(*v)).collect();
            let fb: Fingerprint = b.iter().map(|v| Dep::value(*v)).collect();
            prop_assert_eq!(fa.matches(&fb), a == b);
        }
    }
}
