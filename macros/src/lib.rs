use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::parse::{Parse, ParseStream, Result};
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Expr, Ident, Token};

struct Args(Punctuated<Expr, Token![,]>);

impl Parse for Args {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut punc = Punctuated::new();
        while !input.is_empty() {
            punc.push_value(input.parse()?);
            let comma: Result<Token![,]> = input.parse();
            match comma {
                Ok(comma) => {
                    punc.push_punct(comma);
                }
                Err(e) => {
                    if input.is_empty() {
                        break;
                    } else {
                        return Err(e);
                    }
                }
            }
        }
        Ok(Self(punc))
    }
}

fn seq_elem(idx: usize) -> Ident {
    Ident::new(&format!("__parsel_seq_elem_{idx}"), Span::call_site())
}

#[proc_macro]
pub fn seq(args: TokenStream) -> TokenStream {
    let Args(args) = parse_macro_input!(args as Args);
    let args: Vec<_> = args.into_iter().collect();
    if args.is_empty() {
        return quote! {
            { ::parsel::pure() }
        }
        .into();
    }
    let pairs = seq_pairs(&args[..]);
    let tuple = seq_tuple(0, args.len());
    let vars = (0..args.len()).map(seq_elem);
    quote! {
        {
            ::parsel::map({ #pairs }, |#tuple| (#(#vars,)*))
        }
    }
    .into()
}

fn seq_pairs(args: &[Expr]) -> proc_macro2::TokenStream {
    match args {
        [arg] => quote! { { #arg } },
        [first, second] => quote! {
            { ::parsel::sequence((#first, #second)) }
        },
        _ => {
            let mid = args.len() / 2;
            let first = seq_pairs(&args[..mid]);
            let second = seq_pairs(&args[mid..]);
            quote! {
                { ::parsel::sequence((#first, #second)) }
            }
        }
    }
}

fn seq_tuple(start: usize, end: usize) -> proc_macro2::TokenStream {
    match end - start {
        1 => {
            let var = seq_elem(start);
            quote! { #var }
        }
        2 => {
            let first = seq_elem(start);
            let second = seq_elem(start + 1);
            quote! { (#first, #second) }
        }
        len => {
            let mid = start + len / 2;
            let first = seq_tuple(start, mid);
            let second = seq_tuple(mid, end);
            quote! { (#first, #second) }
        }
    }
}

#[proc_macro]
pub fn alt(args: TokenStream) -> TokenStream {
    let Args(args) = parse_macro_input!(args as Args);
    let args: Vec<_> = args.into_iter().collect();
    if args.is_empty() {
        // No alternatives never match.
        return quote! {
            { ::parsel::alternate(::std::vec::Vec::<::parsel::Literal>::new()) }
        }
        .into();
    }
    alt_impl(&args[..]).into()
}

fn alt_impl(args: &[Expr]) -> proc_macro2::TokenStream {
    match args {
        [arg] => quote! { { #arg } },
        [first, second] => quote! {
            { ::parsel::alternate((#first, #second)) }
        },
        _ => {
            let mid = args.len() / 2;
            let first = alt_impl(&args[..mid]);
            let second = alt_impl(&args[mid..]);
            quote! {
                { ::parsel::alternate((#first, #second)) }
            }
        }
    }
}

#[proc_macro]
pub fn pattern(args: TokenStream) -> TokenStream {
    let mut toks = args.into_iter();
    let Some(tok) = toks.next() else {
        return quote! { ::core::compile_error!("expected one string literal argument") }.into();
    };
    if toks.next().is_some() {
        return quote! { ::core::compile_error!("expected one string literal argument") }.into();
    }
    let expr = match litrs::StringLit::try_from(tok) {
        Ok(expr) => expr.value().to_string(),
        Err(_) => {
            return quote! { ::core::compile_error!("expected one string literal argument") }
                .into();
        }
    };

    if let Err(err) = regex_automata::meta::Regex::new(&expr) {
        let msg = format!("invalid pattern `{expr}`: {err}");
        return quote! { ::core::compile_error!(#msg) }.into();
    }

    quote! {
        match ::parsel::pattern(#expr) {
            ::core::result::Result::Ok(pattern) => pattern,
            ::core::result::Result::Err(_) => ::core::unreachable!(),
        }
    }
    .into()
}
