//! Parses bracketed lists of words, such as `[a [b c] []]`.
//!
//! Run with inputs as arguments, or without arguments to parse a few samples:
//! ```text
//! cargo run --example nested_lists -- "[x [y z]]"
//! ```
//! Set `RUST_LOG=parsel=trace` to see each parse traced.

use parsel::prelude::*;
use std::fmt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Atom(String),
    List(Vec<Item>),
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(word) => f.write_str(word),
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx != 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

fn ws<'i>() -> Parser<'i, &'i str> {
    pattern!(r"\s*").boxed()
}

fn atom<'i>() -> Parser<'i, Item> {
    pattern!("[A-Za-z0-9_]+")
        .map(|word: &str| Item::Atom(word.to_string()))
        .boxed()
}

fn list<'i>() -> Parser<'i, Item> {
    let element = seq!(lazy(item), ws()).map(|(item, _)| item);
    seq!(literal("["), ws(), many(element), literal("]"))
        .map(|(_, _, items, _)| Item::List(items))
        .boxed()
}

fn item<'i>() -> Parser<'i, Item> {
    alt!(atom(), list()).boxed()
}

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {err}");
    }

    let samples = [
        "[a [b c] []]".to_string(),
        "  [nested [lists [of [words]]]]  ".to_string(),
        "[unclosed [list]".to_string(),
        "word".to_string(),
    ];
    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs = if args.is_empty() { &samples[..] } else { &args[..] };

    let document = seq!(ws(), item(), ws(), end()).map(|(_, item, _, _)| item);
    for input in inputs {
        match parse_all(&document, input) {
            Ok(success) => println!("{input:?} => {}", success.value),
            Err(failure) => println!("{input:?} => error: {failure}"),
        }
    }
}
