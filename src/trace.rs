use std::rc::Rc;

/// The outcome of one cell or gate lookup, reported to an optional trace hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The stored fingerprint matched; the previous result was reused.
    Hit,
    /// No match; the computation (or the consumer's work) ran.
    Miss,
}

/// Injectable observer invoked on every lookup. Cells and gates never produce
/// ambient output themselves.
pub type TraceHook = Rc<dyn Fn(Decision)>;

pub(crate) fn emit(trace: &Option<TraceHook>, decision: Decision) {
    #[cfg(feature = "tracing")]
    tracing::trace!(decision = ?decision, "memo lookup");
    if let Some(trace) = trace {
        (**trace)(decision);
    }
}
