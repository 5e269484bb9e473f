use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse2, parse_macro_input,
    punctuated::Punctuated,
    Expr, Result, Token,
};

use crate::deps::{dep_entries, Arg};

struct Memo {
    cell: Expr,
    args: Vec<Arg>,
    body: Expr,
}

impl Parse for Memo {
    fn parse(input: ParseStream) -> Result<Self> {
        let cell = input.parse()?;
        input.parse::<Token![,]>()?;
        input.parse::<Token! {|}>()?;
        let args = Punctuated::<Arg, Token![,]>::parse_separated_nonempty(input)?;
        input.parse::<Token! {|}>()?;
        let body = input.parse()?;
        Ok(Memo {
            cell,
            args: args.into_iter().collect(),
            body,
        })
    }
}

pub fn memo(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input);
    let output: proc_macro2::TokenStream = memo_int(input);
    proc_macro::TokenStream::from(output)
}

pub fn memo_int(input: TokenStream) -> TokenStream {
    let memo: Memo = parse2(input).unwrap();
    let cell = &memo.cell;
    let entries = dep_entries(&memo.args);
    let identifiers: Vec<_> = memo.args.iter().map(|a| &a.ident).collect();
    let body = &memo.body;

    quote! {
        {
            let __deps = Fingerprint::new(vec![#(#entries),*]);
            #(let #identifiers = #identifiers.clone();)*
            #cell.value(__deps, move || #body)
        }
    }
}
