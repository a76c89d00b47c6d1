//! Generic parser and combinator building blocks.
//!
//! This module provides the primitive parsers and the combinators used to
//! compose them. Everything in this module is re-exported at the crate root
//! and, for the constructor functions, in the [`prelude`](crate::prelude).
//!
//! Most functions that take a parser as a parameter and produce a transformed
//! parser (A.K.A. combinators) are also available as methods on the [`Parse`]
//! trait.

use crate::{Failure, PResult, PResultExt, Parse, Span, Spanned, Success};
use core::marker::PhantomData;

/// Parser returned by [`literal`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    text: String,
}

impl Literal {
    /// Gets the text matched by this parser.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl<'i> Parse<'i> for Literal {
    type Parsed = &'i str;

    fn name(&self) -> &str {
        &self.text
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<&'i str> {
        let end = pos.saturating_add(self.text.len());
        match input.get(pos..end) {
            Some(matched) if matched == self.text => Ok(Success::new(matched, pos, end)),
            _ => Err(Failure::expected(&self.text, pos)),
        }
    }
}

/// Creates a parser that matches an exact string.
///
/// The comparison is case-sensitive and byte-exact. On success the parsed
/// value is the matched slice of the input. On failure the message is
/// `"Expected: "` followed by `text`.
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// let hello = literal("hello");
/// assert_eq!(hello.run("say hello", 4), Ok(Success::new("hello", 4, 9)));
/// assert_eq!(hello.run("say hi", 4), Err(Failure::new("Expected: hello", 4)));
/// ```
pub fn literal(text: impl Into<String>) -> Literal {
    Literal { text: text.into() }
}

/// Parser returned by [`pure`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pure;

impl<'i> Parse<'i> for Pure {
    type Parsed = ();

    fn name(&self) -> &str {
        "successful"
    }

    fn run(&self, _input: &'i str, pos: usize) -> PResult<()> {
        PResult::success((), pos, pos)
    }
}

/// Creates a parser that always succeeds without consuming input.
///
/// Useful as the last alternative of an [`alternate`] to provide a default.
pub const fn pure() -> Pure {
    Pure
}

/// Parser returned by [`end`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct End;

impl<'i> Parse<'i> for End {
    type Parsed = ();

    fn name(&self) -> &str {
        "$(End)"
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<()> {
        if pos == input.len() {
            PResult::success((), pos, pos)
        } else {
            PResult::failure("Expected end of input", pos)
        }
    }
}

/// Creates a parser that succeeds only at the end of input.
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// assert!(end().run("abc", 3).is_ok());
/// assert_eq!(end().run("abc", 1), Err(Failure::new("Expected end of input", 1)));
/// ```
pub const fn end() -> End {
    End
}

/// Parser returned by [`many`].
#[derive(Debug, Clone)]
pub struct Many<P> {
    parser: P,
    name: String,
}

impl<'i, P> Parse<'i> for Many<P>
where
    P: Parse<'i>,
{
    type Parsed = Vec<P::Parsed>;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed> {
        let mut values = Vec::new();
        let mut end = pos;
        while let Ok(Success {
            value, end: next, ..
        }) = self.parser.run(input, end)
        {
            assert!(
                next > end,
                "`{}` matched empty input at {end} inside `{}`",
                self.parser.name(),
                self.name,
            );
            values.push(value);
            end = next;
        }
        Ok(Success::new(values, pos, end))
    }
}

/// Creates a parser that applies `parser` as many times as possible.
///
/// `parser` is applied repeatedly, each time starting where the previous
/// application ended, until it fails. The failure is discarded and the values
/// collected so far are returned, so the new parser never fails. Zero
/// repetitions produce an empty [`Vec`] and consume no input.
///
/// # Panics
/// `parser` must consume input whenever it succeeds. Repeating a parser that
/// succeeds on empty input would never terminate, so the returned parser
/// panics when that happens.
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// let parser = many(literal("abc"));
/// let res = parse_all(&parser, "abcabcabcd").unwrap();
/// assert_eq!(res.value, ["abc", "abc", "abc"]);
/// assert_eq!((res.start, res.end), (0, 9));
/// ```
pub fn many<'i, P>(parser: P) -> Many<P>
where
    P: Parse<'i>,
{
    let name = format!("{}*", parser.name());
    Many { parser, name }
}

/// A group of parsers that can be applied one after another.
///
/// Implemented for tuples of up to 12 parsers, producing a tuple of their
/// values, and for [`Vec`]s of parsers of the same type, producing a [`Vec`].
/// See [`sequence`].
pub trait Sequenced<'i> {
    /// The value produced when every parser succeeds.
    type Parsed;

    /// Gets the names of the parsers, in order.
    fn names(&self) -> Vec<&str>;

    /// Applies the parsers in order, starting at `pos`.
    fn run_in_order(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed>;
}

/// A group of parsers producing the same value type that can be tried in turn.
///
/// Implemented for tuples of up to 12 parsers and for [`Vec`]s of parsers of
/// the same type. See [`alternate`].
pub trait Alternatives<'i> {
    /// The value produced by each alternative.
    type Parsed;

    /// Gets the names of the alternatives, in order.
    fn names(&self) -> Vec<&str>;

    /// Gets the first successful result of applying each alternative at `pos`.
    fn run_first(&self, input: &'i str, pos: usize) -> Option<Success<Self::Parsed>>;
}

macro_rules! tuple_impls {
    ($(($P0:ident $(, $P:ident $idx:tt)*))+) => {
        $(
            impl<'i, $P0, $($P,)*> Sequenced<'i> for ($P0, $($P,)*)
            where
                $P0: Parse<'i>,
                $($P: Parse<'i>,)*
            {
                type Parsed = ($P0::Parsed, $($P::Parsed,)*);

                fn names(&self) -> Vec<&str> {
                    vec![self.0.name() $(, self.$idx.name())*]
                }

                #[allow(unused_mut)]
                fn run_in_order(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed> {
                    let Success { value: first, end: mut end, .. } = self.0.run(input, pos)?;
                    let value = (
                        first,
                        $({
                            let Success { value, end: next, .. } = self.$idx.run(input, end)?;
                            end = next;
                            value
                        },)*
                    );
                    Ok(Success::new(value, pos, end))
                }
            }

            impl<'i, $P0, $($P,)*> Alternatives<'i> for ($P0, $($P,)*)
            where
                $P0: Parse<'i>,
                $($P: Parse<'i, Parsed = $P0::Parsed>,)*
            {
                type Parsed = $P0::Parsed;

                fn names(&self) -> Vec<&str> {
                    vec![self.0.name() $(, self.$idx.name())*]
                }

                fn run_first(&self, input: &'i str, pos: usize) -> Option<Success<Self::Parsed>> {
                    if let Ok(success) = self.0.run(input, pos) {
                        return Some(success);
                    }
                    $(
                        if let Ok(success) = self.$idx.run(input, pos) {
                            return Some(success);
                        }
                    )*
                    None
                }
            }
        )+
    };
}

tuple_impls! {
    (P0)
    (P0, P1 1)
    (P0, P1 1, P2 2)
    (P0, P1 1, P2 2, P3 3)
    (P0, P1 1, P2 2, P3 3, P4 4)
    (P0, P1 1, P2 2, P3 3, P4 4, P5 5)
    (P0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6)
    (P0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7)
    (P0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8)
    (P0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9)
    (P0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9, P10 10)
    (P0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9, P10 10, P11 11)
}

impl<'i, P> Sequenced<'i> for Vec<P>
where
    P: Parse<'i>,
{
    type Parsed = Vec<P::Parsed>;

    fn names(&self) -> Vec<&str> {
        self.iter().map(|parser| parser.name()).collect()
    }

    fn run_in_order(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed> {
        let mut values = Vec::with_capacity(self.len());
        let mut end = pos;
        for parser in self {
            let Success {
                value, end: next, ..
            } = parser.run(input, end)?;
            values.push(value);
            end = next;
        }
        Ok(Success::new(values, pos, end))
    }
}

impl<'i, P> Alternatives<'i> for Vec<P>
where
    P: Parse<'i>,
{
    type Parsed = P::Parsed;

    fn names(&self) -> Vec<&str> {
        self.iter().map(|parser| parser.name()).collect()
    }

    fn run_first(&self, input: &'i str, pos: usize) -> Option<Success<Self::Parsed>> {
        self.iter().find_map(|parser| parser.run(input, pos).ok())
    }
}

/// Parser returned by [`sequence`].
#[derive(Debug, Clone)]
pub struct Sequence<S> {
    parsers: S,
    name: String,
}

impl<'i, S> Parse<'i> for Sequence<S>
where
    S: Sequenced<'i>,
{
    type Parsed = S::Parsed;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed> {
        self.parsers.run_in_order(input, pos)
    }
}

/// Creates a parser that matches a sequence of parsers.
///
/// `parsers` is either a tuple of parsers or a [`Vec`] of parsers of the same
/// type (see [`Sequenced`]). Each parser starts where the previous one ended.
/// If all of them succeed, their values are returned in order and the new
/// parser consumes everything from the first parser's start to the last
/// parser's end. If any one of them fails, the whole sequence immediately
/// fails with that failure, unchanged.
///
/// Also see [`seq!`](crate::seq), which accepts any number of parsers.
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// let parser = sequence((literal("a"), literal("b"), literal("z")));
/// assert_eq!(parser.run("abc", 0), Err(Failure::new("Expected: z", 2)));
///
/// let parser = sequence(vec![literal("a"), literal("b")]);
/// assert_eq!(parser.run("abc", 0), Ok(Success::new(vec!["a", "b"], 0, 2)));
/// ```
pub fn sequence<'i, S>(parsers: S) -> Sequence<S>
where
    S: Sequenced<'i>,
{
    let name = parsers.names().join("\u{2192}");
    Sequence { parsers, name }
}

/// Parser returned by [`alternate`].
#[derive(Debug, Clone)]
pub struct Alternate<A> {
    parsers: A,
    name: String,
}

impl<'i, A> Parse<'i> for Alternate<A>
where
    A: Alternatives<'i>,
{
    type Parsed = A::Parsed;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed> {
        self.parsers
            .run_first(input, pos)
            .ok_or_else(|| Failure::expected(&self.name, pos))
    }
}

/// Creates a parser that will match exactly one of its arguments.
///
/// `parsers` is either a tuple of parsers or a [`Vec`] of parsers of the same
/// type (see [`Alternatives`]), all producing the same value type. Each one is
/// applied at the same position, in order, and the first success is returned
/// unchanged. The first match wins even when a later alternative would match
/// more input.
///
/// If every alternative fails, the new parser fails at the starting position
/// with the message `"Expected: "` followed by the names of the alternatives
/// joined with `|`.
///
/// Also see [`alt!`](crate::alt), which accepts any number of parsers.
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// let parser = alternate((literal("a"), literal("ab")));
/// assert_eq!(parser.run("ab", 0), Ok(Success::new("a", 0, 1)));
/// assert_eq!(parser.run("b", 0), Err(Failure::new("Expected: a|ab", 0)));
/// ```
pub fn alternate<'i, A>(parsers: A) -> Alternate<A>
where
    A: Alternatives<'i>,
{
    let name = parsers.names().join("|");
    Alternate { parsers, name }
}

/// Parser returned by [`capture_span`].
#[derive(Debug, Clone)]
pub struct CaptureSpan<P>(P);

impl<'i, P> Parse<'i> for CaptureSpan<P>
where
    P: Parse<'i>,
{
    type Parsed = Spanned<'i, P::Parsed>;

    fn name(&self) -> &str {
        self.0.name()
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed> {
        let success = self.0.run(input, pos)?;
        let span: Span<'i> = success.span(input);
        Ok(success.map_value(|value| Spanned { value, span }))
    }
}

/// Creates a parser that also produces the [`Span`] of input it consumed.
///
/// The parsed value of `parser` is wrapped in [`Spanned`] together with the
/// span between the start and end of the match. Failures are passed through
/// unchanged.
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// let parser = capture_span(many(literal("b")));
/// let res = parser.run("aaabbccc", 3).unwrap();
/// assert_eq!(res.value.value, ["b", "b"]);
/// assert_eq!(res.value.span.as_str(), "bb");
/// ```
pub fn capture_span<'i, P>(parser: P) -> CaptureSpan<P>
where
    P: Parse<'i>,
{
    CaptureSpan(parser)
}

/// Parser returned by [`map`].
#[derive(Debug, Clone)]
pub struct Map<P, F, R>(P, F, PhantomData<fn() -> R>);

impl<'i, P, F, R> Parse<'i> for Map<P, F, R>
where
    P: Parse<'i>,
    F: Fn(P::Parsed) -> R,
{
    type Parsed = R;

    fn name(&self) -> &str {
        self.0.name()
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<R> {
        self.0.run(input, pos).map_parsed(&self.1)
    }
}

/// Creates a parser whose parsed result is transformed.
///
/// The provided function, `map_fn`, is applied to the parsed result of
/// `parser` if it parses successfully. The consumed range is unchanged.
/// `map_fn` should be a pure function that cannot fail; a transform that can
/// fail has to encode that in its return type.
///
/// See also [`Parse::map`].
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// let parser = map(literal("abc"), |text| text.to_uppercase());
/// assert_eq!(parse_all(&parser, "abc").unwrap().value, "ABC");
/// ```
pub fn map<'i, P, F, R>(parser: P, map_fn: F) -> Map<P, F, R>
where
    P: Parse<'i>,
    F: Fn(P::Parsed) -> R,
{
    Map(parser, map_fn, PhantomData)
}

/// Parser returned by [`lazy`].
#[derive(Debug, Clone)]
pub struct Lazy<F, P>(F, PhantomData<fn() -> P>);

impl<'i, F, P> Parse<'i> for Lazy<F, P>
where
    F: Fn() -> P,
    P: Parse<'i>,
{
    type Parsed = P::Parsed;

    fn name(&self) -> &str {
        "Lazy"
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<Self::Parsed> {
        (self.0)().run(input, pos)
    }
}

/// Creates a parser that builds the parser to apply each time it runs.
///
/// `supplier` is called on every run, never cached, and its parser is applied
/// in place of the new parser. This is how a grammar refers to itself: the
/// reference is only resolved when parsing, after the definition is complete.
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// // list := "[" list* "]"
/// fn list<'i>() -> Parser<'i, usize> {
///     sequence((literal("["), many(lazy(list)), literal("]")))
///         .map(|(_, children, _)| children.len())
///         .boxed()
/// }
///
/// assert_eq!(parse_all(&list(), "[[][][[]]]").unwrap().value, 3);
/// ```
pub fn lazy<F, P>(supplier: F) -> Lazy<F, P>
where
    F: Fn() -> P,
{
    Lazy(supplier, PhantomData)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{parse_all, pattern, Parser};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn literal_matches_at_position() {
        assert_eq!(literal("b").run("abc", 1), Ok(Success::new("b", 1, 2)));
        assert_eq!(literal("").run("abc", 3), Ok(Success::new("", 3, 3)));
        assert_eq!(literal("c").run("abc", 3), Err(Failure::new("Expected: c", 3)));
        assert_eq!(literal("B").run("abc", 1), Err(Failure::new("Expected: B", 1)));
        assert_eq!(literal(String::from("bc")).as_str(), "bc");
    }

    #[test]
    fn literal_rejects_split_characters() {
        let input = "\u{e9}t\u{e9}";
        assert_eq!(literal("t").run(input, 1), Err(Failure::new("Expected: t", 1)));
        assert_eq!(literal("t").run(input, 2), Ok(Success::new("t", 2, 3)));
    }

    #[test]
    fn pure_consumes_nothing() {
        assert_eq!(pure().run("abc", 2), Ok(Success::new((), 2, 2)));
        assert_eq!(Parse::name(&pure()), "successful");
    }

    #[test]
    fn many_collects_repetitions() {
        let res = many(literal("abc")).run("abcabcabcd", 0).unwrap();
        assert_eq!(res.value, ["abc", "abc", "abc"]);
        assert_eq!((res.start, res.end), (0, 9));
    }

    #[test]
    fn many_with_no_repetitions() {
        let res = many(literal("x")).run("abc", 1);
        assert_eq!(res, Ok(Success::new(Vec::new(), 1, 1)));
        assert_eq!(Parse::name(&many(literal("x"))), "x*");
    }

    #[test]
    #[should_panic(expected = "matched empty input")]
    fn many_panics_on_empty_match() {
        let _ = many(pure()).run("abc", 0);
    }

    #[test]
    fn sequence_collects_values() {
        let parser = sequence((
            literal("a"),
            literal("b"),
            many(literal("c")),
            literal("d"),
        ));
        let res = parser.run("abcccd", 0).unwrap();
        assert_eq!(res.value, ("a", "b", vec!["c", "c", "c"], "d"));
        assert_eq!((res.start, res.end), (0, 6));
        assert_eq!(parser.name(), "a\u{2192}b\u{2192}c*\u{2192}d");
    }

    #[test]
    fn sequence_short_circuits() {
        let parser = sequence((literal("a"), literal("b"), literal("z")));
        assert_eq!(parser.run("abc", 0), Err(Failure::new("Expected: z", 2)));

        let parser = sequence((literal("x"), literal("b")));
        assert_eq!(parser.run("abc", 0), Err(Failure::new("Expected: x", 0)));
    }

    #[test]
    fn sequence_of_vec() {
        let parser = sequence(vec![literal("a"), literal("b"), literal("c")]);
        assert_eq!(parser.run("abc", 0), Ok(Success::new(vec!["a", "b", "c"], 0, 3)));

        let empty: Sequence<Vec<Literal>> = sequence(Vec::new());
        assert_eq!(empty.run("abc", 1), Ok(Success::new(Vec::new(), 1, 1)));
    }

    #[test]
    fn alternate_prefers_first_match() {
        let parser = alternate((literal("a"), literal("ab")));
        assert_eq!(parser.run("ab", 0), Ok(Success::new("a", 0, 1)));

        let parser = alternate((literal("a"), literal("b"), literal("c")));
        assert_eq!(parser.run("b", 0), Ok(Success::new("b", 0, 1)));
    }

    #[test]
    fn alternate_reports_all_names() {
        let parser = alternate((
            sequence((literal("a"), literal("b"))),
            sequence((literal("c"), literal("d"))),
        ));
        assert_eq!(
            parser.run("xacx", 2),
            Err(Failure::new("Expected: a\u{2192}b|c\u{2192}d", 2))
        );

        let parser = alternate(vec![literal("x"), literal("y")]);
        assert_eq!(parser.run("z", 0), Err(Failure::new("Expected: x|y", 0)));
    }

    #[test]
    fn alternate_restarts_each_branch() {
        let parser = alternate((
            sequence((literal("a"), literal("x"))),
            sequence((literal("a"), literal("b"))),
        ));
        assert_eq!(parser.run("ab", 0), Ok(Success::new(("a", "b"), 0, 2)));
    }

    #[test]
    fn capture_span_keeps_range() {
        let parser = sequence((
            many(literal("a")),
            capture_span(many(literal("b"))),
            many(literal("c")),
        ));
        let res = parse_all(&parser, "aaabbccc").unwrap();
        let (a, b, c) = res.value;
        assert_eq!(a, ["a", "a", "a"]);
        assert_eq!(b.value, ["b", "b"]);
        assert_eq!(b.span, Span::new("aaabbccc", 3, 5));
        assert_eq!(c, ["c", "c", "c"]);

        let res = capture_span(literal("x")).run("axb", 1).unwrap();
        assert_eq!((res.start, res.end), (1, 2));
        assert_eq!(
            capture_span(literal("x")).run("abc", 1),
            Err(Failure::new("Expected: x", 1))
        );
    }

    #[test]
    fn map_transforms_value_only() {
        let parser = map(literal("abc"), |text| text.len());
        assert_eq!(parser.run("xabc", 1), Ok(Success::new(3, 1, 4)));
        assert_eq!(parser.run("xabd", 1), Err(Failure::new("Expected: abc", 1)));
        assert_eq!(parser.name(), "abc");
    }

    #[test]
    fn end_of_input() {
        assert_eq!(end().run("ab", 2), Ok(Success::new((), 2, 2)));
        assert_eq!(end().run("ab", 0), Err(Failure::new("Expected end of input", 0)));
    }

    fn parens<'i>() -> Parser<'i, usize> {
        alternate((
            sequence((literal("("), lazy(parens), literal(")"))).map(|(_, depth, _)| depth + 1),
            pure().map(|()| 0),
        ))
        .boxed()
    }

    #[test]
    fn lazy_supports_recursion() {
        let input = format!("{}{}", "(".repeat(100), ")".repeat(100));
        let unbalanced = format!("{}{}", "(".repeat(3), ")".repeat(2));
        let grammar = sequence((parens(), end())).map(|(depth, ())| depth);
        assert_eq!(parse_all(&grammar, &input), Ok(Success::new(100, 0, 200)));
        assert_eq!(
            parse_all(&grammar, &unbalanced),
            Err(Failure::new("Expected end of input", 0))
        );
    }

    #[test]
    fn lazy_resolves_on_every_run() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = AtomicUsize::new(0);
        let parser = lazy(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            literal("a")
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(parser.run("a", 0), Ok(Success::new("a", 0, 1)));
        assert_eq!(parser.run("a", 0), Ok(Success::new("a", 0, 1)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(parser.name(), "Lazy");
    }

    proptest! {
        #[test]
        fn literal_matches_its_text(
            prefix in "[a-c]{0,6}",
            text in "[a-c]{0,6}",
            suffix in "[a-c]{0,6}",
        ) {
            let input = format!("{prefix}{text}{suffix}");
            let res = literal(text.as_str()).run(&input, prefix.len()).unwrap();
            prop_assert_eq!(res.value, text.as_str());
            prop_assert_eq!(res.start, prefix.len());
            prop_assert_eq!(res.end, prefix.len() + text.len());
        }

        #[test]
        fn literal_mismatch_reports_position(
            input in "[a-c]{0,10}",
            text in "[a-c]{1,4}",
            pos in 0usize..=10,
        ) {
            prop_assume!(pos <= input.len() && !input[pos..].starts_with(text.as_str()));
            let res = literal(text.as_str()).run(&input, pos);
            prop_assert_eq!(res, Err(Failure::new(format!("Expected: {text}"), pos)));
        }

        #[test]
        fn many_never_fails(input in "[ab]{0,16}", pos in 0usize..=16) {
            prop_assume!(pos <= input.len());
            let res = many(literal("a")).run(&input, pos).unwrap();
            let count = input[pos..].chars().take_while(|ch| *ch == 'a').count();
            prop_assert_eq!(res.value.len(), count);
            prop_assert_eq!(res.start, pos);
            prop_assert_eq!(res.end, pos + count);
        }

        #[test]
        fn map_identity_is_transparent(input in "[ab ]{0,16}") {
            let parser = sequence((pattern("[ab]*").unwrap(), many(literal(" "))));
            let identity = map(&parser, |value| value);
            prop_assert_eq!(identity.run(&input, 0), parser.run(&input, 0));
        }

        #[test]
        fn parsers_are_deterministic(input in "[abc]{0,16}") {
            let parser = many(alternate((literal("ab"), literal("c"))));
            prop_assert_eq!(parser.run(&input, 0), parser.run(&input, 0));
        }
    }
}
