#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Parser-combinator engine for Rust.
//! `parsel` is a small parser-combinator library for building recursive
//! descent parsers over string input. A parser is a named, pure function from
//! an input string and a cursor position to either a [`Success`] (a value plus
//! the consumed byte range) or a [`Failure`] (a diagnostic message plus the
//! position where parsing failed).
//!
//! # Contents
//! * [Example](#example) - Jump directly into an example parser
//! * [Parsers and Positions](#parsers-and-positions) - How input is consumed
//! * [Combinators](#combinators) - The available building blocks
//! * [Recursive Grammars](#recursive-grammars) - Using [`lazy`]
//! * [Parsing Failures](#parsing-failures) - How failures are reported
//! * [Features](#features) - Available crate features
//!
//! # Example
//! ```
//! use parsel::prelude::*;
//!
//! let ident = pattern!("[A-Za-z_][A-Za-z0-9_]*");
//! let ws = pattern!(r"[ \t]*");
//! let assignment = sequence((&ident, &ws, literal("="), &ws, pattern!("[0-9]+"), end()))
//!     .map(|(key, _, _, _, value, _)| (key, value.parse::<u32>().unwrap_or_default()));
//!
//! let parsed = parse_all(&assignment, "answer = 42").unwrap();
//! assert_eq!(parsed.value, ("answer", 42));
//! assert_eq!(parsed.end, 11);
//!
//! let failed = parse_all(&assignment, "answer: 42").unwrap_err();
//! assert_eq!(failed, Failure::new("Expected: =", 6));
//! ```
//!
//! # Parsers and Positions
//! Every parser implements the [`Parse`] trait. [`Parse::run`] receives the
//! complete input and a byte offset into it, and reports what it consumed as
//! a `start..end` range of byte offsets. Input is never copied or mutated;
//! parsers that match text, such as [`literal`] and [`pattern`], produce
//! slices of the original input.
//!
//! Parsers hold no per-invocation state. Running the same parser twice with
//! the same arguments yields equal results, and a parser may be shared
//! between threads as long as the closures it was built from allow it.
//!
//! # Combinators
//! * [`literal`] - match an exact string
//! * [`pattern`] - match a regular expression anchored at the cursor
//! * [`pure`] - succeed without consuming input
//! * [`end`] - succeed only at the end of input
//! * [`many`] - greedy repetition, never fails
//! * [`sequence`] - apply parsers one after another
//! * [`alternate`] - ordered choice, the first success wins
//! * [`capture_span`] - attach the consumed [`Span`] to the parsed value
//! * [`map`] - transform the parsed value
//! * [`lazy`] - defer building a parser until it runs
//!
//! Most combinators are also available as methods on [`Parse`], so
//! `many(literal("a"))` can also be written `literal("a").many()`.
//!
//! # Recursive Grammars
//! A grammar that refers to itself cannot be built eagerly. [`lazy`] wraps a
//! function that builds the parser on every run, and [`Parse::boxed`] erases
//! the concrete parser type so that such functions have a nameable return
//! type.
//!
//! ```
//! use parsel::prelude::*;
//!
//! // Counts the nesting depth of balanced parentheses.
//! fn parens<'i>() -> Parser<'i, usize> {
//!     alternate((
//!         sequence((literal("("), lazy(parens), literal(")"))).map(|(_, depth, _)| depth + 1),
//!         pure().map(|()| 0),
//!     ))
//!     .boxed()
//! }
//!
//! assert_eq!(parse_all(&parens(), "((()))").unwrap().value, 3);
//! ```
//!
//! # Parsing Failures
//! A [`Failure`] is plain data. Combinators pass failures of their children
//! through unchanged, with two exceptions: [`many`] stops at the first failure
//! and succeeds with what it collected so far, and [`alternate`] replaces the
//! failures of all its alternatives with a single failure listing their names.
//!
//! # Features
//! * `macros` - Enables the [`pattern!`], [`seq!`] and [`alt!`] macros.
//!   Enabled by default.

mod regex;
mod span;

pub mod basic;
pub mod parser;

pub use basic::{
    alternate, capture_span, end, lazy, literal, many, map, pure, sequence, Alternate,
    Alternatives, CaptureSpan, End, Lazy, Literal, Many, Map, Pure, Sequence, Sequenced,
};
pub use parser::Parser;
pub use regex::{pattern, Pattern, PatternError};
pub use span::{Span, Spanned};

/// Creates a [`Pattern`] parser from a regular expression checked at compile time.
///
/// The argument must be a single string literal. An invalid expression is
/// reported as a compile error instead of a [`PatternError`].
///
/// # Example
/// ```
/// use parsel::prelude::*;
///
/// let digits = pattern!("[0-9]+");
/// assert_eq!(parse_all(&digits, "123abc").unwrap().value, "123");
/// ```
#[cfg(feature = "macros")]
pub use parsel_macros::pattern;

/// Creates a parser that matches a sequence of parsers.
///
/// [`seq!`] accepts any number of parsers as arguments and produces their
/// values as a flat tuple in argument order. It is a variadic version of
/// [`sequence`], and is implemented as nested two-element sequences. With no
/// arguments it is the same as [`pure`].
///
/// # Example
/// ```
/// use parsel::prelude::*;
///
/// let parser = seq!(literal("a"), literal("b"), literal("c"), literal("d"));
/// assert_eq!(parse_all(&parser, "abcd").unwrap().value, ("a", "b", "c", "d"));
/// ```
#[cfg(feature = "macros")]
pub use parsel_macros::seq;

/// Creates a parser that will match exactly one of its arguments.
///
/// [`alt!`] accepts any number of parsers producing the same value type. It is
/// a variadic version of [`alternate`]. With no arguments the parser always
/// fails with the message `"Expected: "`.
///
/// # Example
/// ```
/// use parsel::prelude::*;
///
/// let parser = alt!(literal("a"), literal("b"), literal("c"));
/// assert_eq!(parse_all(&parser, "c").unwrap().value, "c");
/// assert_eq!(parse_all(&parser, "d").unwrap_err().message, "Expected: a|b|c");
/// ```
#[cfg(feature = "macros")]
pub use parsel_macros::alt;

extern crate self as parsel;

/// The crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The `parsel` prelude.
pub mod prelude {
    pub use super::basic::{
        alternate, capture_span, end, lazy, literal, many, map, pure, sequence,
    };
    pub use super::{
        parse_all, pattern, Failure, PResult, PResultExt as _, Parse, Parser, Span, Spanned,
        Success,
    };

    #[cfg(feature = "macros")]
    pub use super::{alt, seq};
}

/// Type returned by a parser when parsing succeeds.
///
/// [`Success`] is returned in the [`Ok`] variant of a [`PResult`]. It holds the
/// parsed value and the byte range of the input that the parser consumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Success<T> {
    /// The parsed value
    pub value: T,
    /// Offset where the parser started consuming input
    pub start: usize,
    /// Offset just past the last consumed byte
    pub end: usize,
}

impl<T> Success<T> {
    /// Creates a new [`Success`].
    pub fn new(value: T, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { value, start, end }
    }

    /// Transforms the parsed value, keeping the consumed range.
    pub fn map_value<R>(self, map_fn: impl FnOnce(T) -> R) -> Success<R> {
        Success::new(map_fn(self.value), self.start, self.end)
    }

    /// Gets the [`Span`] of `input` consumed by the parser.
    ///
    /// `input` must be the same input the parser ran on.
    pub fn span<'i>(&self, input: &'i str) -> Span<'i> {
        Span::new(input, self.start, self.end)
    }
}

/// Type returned by a parser when parsing fails.
///
/// [`Failure`] is returned in the [`Err`] variant of a [`PResult`]. It holds a
/// human readable message and the input offset at which parsing failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message} at position {position}")]
pub struct Failure {
    /// Description of what the parser expected
    pub message: String,
    /// Offset of the input where the failure occurred
    pub position: usize,
}

impl Failure {
    /// Creates a new [`Failure`].
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Creates a [`Failure`] with the message `"Expected: {what}"`.
    pub fn expected(what: &str, position: usize) -> Self {
        Self::new(format!("Expected: {what}"), position)
    }
}

/// The [`Result`] type returned by a parser.
///
/// All parsers return either a [`Success`] when parsing succeeds, or a
/// [`Failure`] when parsing fails.
pub type PResult<T> = Result<Success<T>, Failure>;

/// Trait implemented by all parsers.
///
/// A parser is a named, pure function from an input string and a byte offset
/// to a [`PResult`]. The name is only used for diagnostics, such as the failure
/// message of [`alternate`]. See the crate level documentation for examples.
pub trait Parse<'i> {
    /// The value type that is produced by the parser on success.
    type Parsed;

    /// Gets the name of the parser.
    fn name(&self) -> &str;

    /// Runs the parser on `input`, starting at the byte offset `pos`.
    ///
    /// `pos` must not exceed `input.len()`.
    fn run(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed>;

    /// Creates a parser that applies `self` as many times as possible.
    ///
    /// See [`basic::many`].
    ///
    /// # Example
    /// ```
    /// # use parsel::prelude::*;
    /// assert_eq!(parse_all(&literal("a").many(), "aaa").unwrap().value, ["a", "a", "a"]);
    /// ```
    #[inline]
    fn many(self) -> Many<Self>
    where
        Self: Sized,
    {
        basic::many(self)
    }

    /// Creates a parser that tries `self`, then `other`.
    ///
    /// See [`basic::alternate`].
    ///
    /// # Example
    /// ```
    /// # use parsel::prelude::*;
    /// assert_eq!(parse_all(&literal("x").or(literal("y")), "y").unwrap().value, "y");
    /// ```
    #[inline]
    fn or<P>(self, other: P) -> Alternate<(Self, P)>
    where
        Self: Sized,
        P: Parse<'i, Parsed = Self::Parsed>,
    {
        basic::alternate((self, other))
    }

    /// Creates a parser that applies `self`, then `other`.
    ///
    /// The parsed value is a pair. Chaining several calls nests the pairs, so
    /// prefer [`basic::sequence`] or [`seq!`] for longer sequences.
    ///
    /// # Example
    /// ```
    /// # use parsel::prelude::*;
    /// assert_eq!(parse_all(&literal("a").seq(literal("b")), "ab").unwrap().value, ("a", "b"));
    /// ```
    #[inline]
    fn seq<P>(self, other: P) -> Sequence<(Self, P)>
    where
        Self: Sized,
        P: Parse<'i>,
    {
        basic::sequence((self, other))
    }

    /// Creates a parser that also produces the [`Span`] consumed by `self`.
    ///
    /// See [`basic::capture_span`].
    #[inline]
    fn capture_span(self) -> CaptureSpan<Self>
    where
        Self: Sized,
    {
        basic::capture_span(self)
    }

    /// Creates a parser whose parsed result is transformed.
    ///
    /// See [`basic::map`].
    ///
    /// # Example
    /// ```
    /// # use parsel::prelude::*;
    /// let parser = literal("abc").map(|text| text.to_uppercase());
    /// assert_eq!(parse_all(&parser, "abc").unwrap().value, "ABC");
    /// ```
    #[inline]
    fn map<F, R>(self, map_fn: F) -> Map<Self, F, R>
    where
        Self: Sized,
        F: Fn(Self::Parsed) -> R,
    {
        basic::map(self, map_fn)
    }

    /// Erases the concrete type of the parser.
    ///
    /// See [`Parser`].
    #[inline]
    fn boxed(self) -> Parser<'i, Self::Parsed>
    where
        Self: Sized + Send + Sync + 'i,
    {
        Parser::from_parse(self)
    }
}

impl<'i, P> Parse<'i> for &P
where
    P: Parse<'i> + ?Sized,
{
    type Parsed = P::Parsed;

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn run(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed> {
        (**self).run(input, pos)
    }
}

mod sealed {
    use super::PResult;

    pub trait Sealed {}

    impl<T> Sealed for PResult<T> {}
}

/// Additional convenience methods for [`PResult`].
pub trait PResultExt: sealed::Sealed {
    type Parsed;

    fn success(parsed: Self::Parsed, start: usize, end: usize) -> Self;

    fn failure(message: impl Into<String>, position: usize) -> Self;

    fn parsed(&self) -> Option<&Self::Parsed>;

    /// Gets the end of the consumed input on success, or the failure position.
    fn position(&self) -> usize;

    fn map_parsed<F, R>(self, map_fn: F) -> PResult<R>
    where
        F: FnOnce(Self::Parsed) -> R;
}

impl<T> PResultExt for PResult<T> {
    type Parsed = T;

    fn success(parsed: T, start: usize, end: usize) -> Self {
        Ok(Success::new(parsed, start, end))
    }

    fn failure(message: impl Into<String>, position: usize) -> Self {
        Err(Failure::new(message, position))
    }

    fn parsed(&self) -> Option<&T> {
        match self {
            Ok(success) => Some(&success.value),
            Err(_) => None,
        }
    }

    fn position(&self) -> usize {
        match self {
            Ok(success) => success.end,
            Err(failure) => failure.position,
        }
    }

    fn map_parsed<F, R>(self, map_fn: F) -> PResult<R>
    where
        F: FnOnce(T) -> R,
    {
        self.map(|success| success.map_value(map_fn))
    }
}

/// Runs `parser` over the complete `input`, starting at offset 0.
///
/// The result of the parser is returned as is. In particular, the parser is
/// not required to consume all of the input; sequence it with [`end`] when
/// that is needed.
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// let res = parse_all(&literal("hello"), "hello, world").unwrap();
/// assert_eq!((res.value, res.start, res.end), ("hello", 0, 5));
/// ```
pub fn parse_all<'i, P>(parser: &P, input: &'i str) -> PResult<P::Parsed>
where
    P: Parse<'i> + ?Sized,
{
    let span = tracing::trace_span!("parse_all", parser = parser.name(), len = input.len());
    let _guard = span.enter();

    let res = parser.run(input, 0);
    match &res {
        Ok(success) => tracing::trace!(end = success.end, "parse succeeded"),
        Err(failure) => tracing::trace!(
            position = failure.position,
            message = %failure.message,
            "parse failed"
        ),
    }
    res
}
