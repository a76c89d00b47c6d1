use crate::{Failure, PResult, Parse, Success};
use regex_automata::{
    meta::{BuildError, Regex},
    Anchored, Input,
};

/// Error returned by [`pattern`] when the expression does not compile.
#[derive(Debug, thiserror::Error)]
#[error("invalid pattern `{expr}`")]
pub struct PatternError {
    expr: String,
    #[source]
    source: BuildError,
}

impl PatternError {
    /// Gets the expression that failed to compile.
    pub fn expr(&self) -> &str {
        &self.expr
    }
}

/// Parser returned by [`pattern`].
#[derive(Debug, Clone)]
pub struct Pattern {
    expr: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `expr` into a [`Pattern`] parser.
    ///
    /// Same as [`pattern`].
    pub fn new(expr: impl Into<String>) -> Result<Self, PatternError> {
        let expr = expr.into();
        match Regex::new(&expr) {
            Ok(regex) => Ok(Self { expr, regex }),
            Err(source) => {
                tracing::debug!(%expr, error = %source, "failed to compile pattern");
                Err(PatternError { expr, source })
            }
        }
    }

    /// Gets the source expression.
    pub fn as_str(&self) -> &str {
        &self.expr
    }
}

impl<'i> Parse<'i> for Pattern {
    type Parsed = &'i str;

    fn name(&self) -> &str {
        &self.expr
    }

    fn run(&self, input: &'i str, pos: usize) -> PResult<&'i str> {
        // Also rejects `pos > input.len()`.
        if input.is_char_boundary(pos) {
            let search = Input::new(input).range(pos..).anchored(Anchored::Yes);
            if let Some(found) = self.regex.search(&search) {
                return Ok(Success::new(
                    &input[found.start()..found.end()],
                    pos,
                    found.end(),
                ));
            }
        }
        Err(Failure::new(format!("Expected regexp: {}", self.expr), pos))
    }
}

/// Creates a parser that matches a regular expression.
///
/// The expression uses the syntax of the
/// [`regex`](https://docs.rs/regex/latest/regex/#syntax) crate. The match must
/// begin exactly at the parser's starting position; the input is never
/// scanned for a later match. Assertions such as `^` and `\b` see the whole
/// input, so `^` only matches at offset 0. On success the parsed value is the
/// matched slice of the input. On failure the message is `"Expected regexp: "`
/// followed by `expr`.
///
/// The compiled expression keeps its scratch space per thread, so a
/// [`Pattern`] can run concurrently without its searches interfering.
///
/// When the expression is a string literal, [`pattern!`](crate::pattern!)
/// checks it at compile time instead of returning a [`PatternError`].
///
/// # Example
/// ```
/// # use parsel::prelude::*;
/// let ws = pattern(r"\s*")?;
/// assert_eq!(ws.run("a  \tc", 1), Ok(Success::new("  \t", 1, 4)));
///
/// let digits = pattern("[0-9]+")?;
/// assert_eq!(digits.run("ab12", 0), Err(Failure::new("Expected regexp: [0-9]+", 0)));
///
/// assert!(pattern("[0-9").is_err());
/// # Ok::<(), parsel::PatternError>(())
/// ```
pub fn pattern(expr: impl Into<String>) -> Result<Pattern, PatternError> {
    Pattern::new(expr)
}
