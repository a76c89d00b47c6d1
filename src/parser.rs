//! Type-erased parsers.

use crate::{PResult, Parse};
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

/// A parser with its concrete type erased.
///
/// Combinators produce deeply nested parser types. [`Parser`] hides that type
/// behind a shared pointer, which gives functions that build grammars a
/// nameable return type. This is required for recursive grammars, since the
/// type of a parser that contains itself (through [`lazy`](crate::lazy))
/// cannot be written out.
///
/// Cloning a [`Parser`] is cheap and the clone refers to the same parser. A
/// [`Parser`] is [`Send`] and [`Sync`], so one grammar can be used from
/// several threads at once.
///
/// A [`Parser`] is usually created with [`Parse::boxed`], or from a plain
/// function with [`Parser::new`].
pub struct Parser<'i, T> {
    inner: Arc<dyn Parse<'i, Parsed = T> + Send + Sync + 'i>,
}

impl<'i, T> Parser<'i, T> {
    /// Creates a named parser from a function.
    ///
    /// `run_fn` receives the complete input and the position to parse from,
    /// and must behave as described for [`Parse::run`].
    ///
    /// # Example
    /// ```
    /// # use parsel::prelude::*;
    /// // Consumes a single character.
    /// let any_char = Parser::new("any character", |input: &str, pos| {
    ///     match input[pos..].chars().next() {
    ///         Some(ch) => PResult::success(ch, pos, pos + ch.len_utf8()),
    ///         None => PResult::failure("Expected: any character", pos),
    ///     }
    /// });
    ///
    /// assert_eq!(parse_all(&any_char, "\u{e9}t\u{e9}").unwrap().end, 2);
    /// assert!(parse_all(&any_char, "").is_err());
    /// ```
    pub fn new<F>(name: impl Into<String>, run_fn: F) -> Self
    where
        F: Fn(&'i str, usize) -> PResult<T> + Send + Sync + 'i,
        T: 'i,
    {
        Self::from_parse(FnParser {
            name: name.into(),
            run_fn,
            _parsed: PhantomData,
        })
    }

    /// Erases the type of an existing parser.
    ///
    /// Equivalent to [`Parse::boxed`].
    pub fn from_parse<P>(parser: P) -> Self
    where
        P: Parse<'i, Parsed = T> + Send + Sync + 'i,
    {
        Self {
            inner: Arc::new(parser),
        }
    }
}

impl<T> Clone for Parser<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Parser<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("name", &self.inner.name())
            .finish_non_exhaustive()
    }
}

impl<'i, T> Parse<'i> for Parser<'i, T> {
    type Parsed = T;

    #[inline]
    fn name(&self) -> &str {
        self.inner.name()
    }

    #[inline]
    fn run(&self, input: &'i str, pos: usize) -> PResult<T> {
        self.inner.run(input, pos)
    }
}

struct FnParser<F, T> {
    name: String,
    run_fn: F,
    _parsed: PhantomData<fn() -> T>,
}

impl<'i, F, T> Parse<'i> for FnParser<F, T>
where
    F: Fn(&'i str, usize) -> PResult<T>,
{
    type Parsed = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<T> {
        (self.run_fn)(input, pos)
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    fn digit<'i>() -> Parser<'i, u32> {
        Parser::new("digit", |input: &'i str, pos| {
            match input[pos..].chars().next().and_then(|ch| ch.to_digit(10)) {
                Some(digit) => PResult::success(digit, pos, pos + 1),
                None => PResult::failure("Expected: digit", pos),
            }
        })
    }

    #[test]
    fn function_parser() {
        let number = digit()
            .many()
            .map(|digits| digits.into_iter().fold(0, |acc, d| acc * 10 + d));
        assert_eq!(parse_all(&number, "1234x"), Ok(Success::new(1234, 0, 4)));
        assert_eq!(number.name(), "digit*");
    }

    #[test]
    fn function_parser_in_alternation() {
        let parser = alternate((digit(), literal("x").map(|_| 0)));
        assert_eq!(parse_all(&parser, "?"), Err(Failure::new("Expected: digit|x", 0)));
    }

    #[test]
    fn clones_share_parser() {
        let boxed = literal("ab").boxed();
        let clone = boxed.clone();
        assert_eq!(clone.name(), "ab");
        assert_eq!(parse_all(&clone, "abc"), parse_all(&boxed, "abc"));
        assert_eq!(format!("{boxed:?}"), "Parser { name: \"ab\", .. }");
    }
}
