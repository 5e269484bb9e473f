mod callback;
mod cell;
mod dep;
mod gate;
mod trace;

pub use callback::{Callback, CallbackCell};
pub use cell::MemoCell;
pub use dep::{Dep, Fingerprint};
pub use gate::{should_skip, Gate};
pub use trace::{Decision, TraceHook};

pub use memocell_macros::{deps, memo};
