use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse2, parse_macro_input,
    punctuated::Punctuated,
    Ident, Result, Token,
};

pub(crate) enum ArgKind {
    Handle,
    Value,
}

pub(crate) struct Arg {
    kind: ArgKind,
    pub(crate) ident: Ident,
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> Result<Self> {
        let kind = if input.peek(Token![&]) {
            input.parse::<Token![&]>()?;
            ArgKind::Handle
        } else {
            ArgKind::Value
        };
        let ident = input.parse()?;
        Ok(Arg { kind, ident })
    }
}

/// One `Dep` constructor per argument; `&ident` selects an identity dep.
pub(crate) fn dep_entries(args: &[Arg]) -> Vec<TokenStream> {
    args.iter()
        .map(|arg| {
            let ident = &arg.ident;
            match arg.kind {
                ArgKind::Handle => quote! { Dep::handle(#ident.clone()) },
                ArgKind::Value => quote! { Dep::value(#ident.clone()) },
            }
        })
        .collect()
}

struct DepList {
    args: Vec<Arg>,
}

impl Parse for DepList {
    fn parse(input: ParseStream) -> Result<Self> {
        let args = Punctuated::<Arg, Token![,]>::parse_terminated(input)?;
        Ok(DepList {
            args: args.into_iter().collect(),
        })
    }
}

pub fn deps(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input);
    let output: proc_macro2::TokenStream = deps_int(input);
    proc_macro::TokenStream::from(output)
}

pub fn deps_int(input: TokenStream) -> TokenStream {
    let list: DepList = parse2(input).unwrap();
    let entries = dep_entries(&list.args);

    quote! {
        Fingerprint::new(vec![#(#entries),*])
    }
}
