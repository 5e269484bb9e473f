use crate::{
    dep::Fingerprint,
    trace::{self, Decision, TraceHook},
};
use std::cell::RefCell;

/// Returns true iff a consumer may skip redoing its work, i.e. every pair of
/// corresponding inputs is shallowly equal. This is the mirror image of the
/// fingerprint check inside a cell, applied at the producer/consumer boundary.
pub fn should_skip(prev: &Fingerprint, next: &Fingerprint) -> bool {
    prev.matches(next)
}

/// The skip decision for one consumer, with the previous cycle's inputs kept
/// across calls.
///
/// Without a gate the surrounding driver re-runs every consumer on any state
/// change; the gate short-circuits the ones whose inputs did not change.
pub struct Gate {
    last: RefCell<Option<Fingerprint>>,
    trace: Option<TraceHook>,
}

impl Gate {
    pub fn new() -> Self {
        Gate {
            last: RefCell::new(None),
            trace: None,
        }
    }

    pub fn with_trace(trace: TraceHook) -> Self {
        Gate {
            last: RefCell::new(None),
            trace: Some(trace),
        }
    }

    /// Runs `work` unless `inputs` matches the inputs recorded by the
    /// previous run. Returns whether work ran.
    pub fn run(&self, inputs: Fingerprint, work: impl FnOnce()) -> bool {
        let skip = match &*self.last.borrow() {
            Some(prev) => should_skip(prev, &inputs),
            None => false,
        };

        if skip {
            trace::emit(&self.trace, Decision::Hit);
            return false;
        }

        trace::emit(&self.trace, Decision::Miss);
        *self.last.borrow_mut() = Some(inputs);
        work();
        true
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dep::Dep;
    use std::cell::Cell;

    fn names(values: &[&'static str]) -> Fingerprint {
        values.iter().map(|v| Dep::value(*v)).collect()
    }

    #[test]
    fn equal_inputs_skip() {
        assert!(should_skip(
            &names(&["Apple", "Banana"]),
            &names(&["Apple", "Banana"]),
        ));
        assert!(!should_skip(
            &names(&["Apple", "Banana"]),
            &names(&["Apple", "Mango"]),
        ));
    }

    #[test]
    fn gate_runs_once_per_distinct_inputs() {
        let gate = Gate::new();
        let runs = Cell::new(0);
        for inputs in [&["Apple"][..], &["Apple"][..], &["Mango"][..], &["Mango"][..]] {
            gate.run(names(inputs), || runs.set(runs.get() + 1));
        }
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn first_run_never_skips() {
        let gate = Gate::new();
        assert!(gate.run(Fingerprint::empty(), || ()));
        assert!(!gate.run(Fingerprint::empty(), || ()));
    }
}
