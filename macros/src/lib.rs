use proc_macro::TokenStream;

mod deps;
mod memo;

/// `deps!(a, b, &c)` builds a `Fingerprint` from the named dependencies,
/// cloning each one. A `&` prefix marks an identity dep (an `Rc` compared by
/// pointer). `Fingerprint` and `Dep` must be in scope at the call site.
#[proc_macro]
pub fn deps(input: TokenStream) -> TokenStream {
    deps::deps(input)
}

/// `memo!(cell, |a, &b| body)` evaluates `cell.value(..)` keyed on the named
/// dependencies, cloning them into the compute closure.
#[proc_macro]
pub fn memo(input: TokenStream) -> TokenStream {
    memo::memo(input)
}
