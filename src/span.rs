use core::fmt;

/// A slice of parser input.
///
/// A [`Span`] represents a subset of the input string. Internally, a [`Span`]
/// consists of the full input and two byte offsets: one marking the start
/// of the [`Span`] and the other marking the end. The text between them is
/// only materialized when requested with [`Span::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span<'i> {
    source: &'i str,
    start: usize,
    end: usize,
}

impl<'i> Span<'i> {
    /// Creates a new [`Span`] over `source` between `start` and `end`.
    ///
    /// `start` and `end` are byte offsets and must satisfy
    /// `start <= end <= source.len()`.
    pub fn new(source: &'i str, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= source.len());
        Self { source, start, end }
    }

    /// Gets the start offset of the [`Span`].
    pub fn start(&self) -> usize {
        self.start
    }

    /// Gets the end offset of the [`Span`].
    pub fn end(&self) -> usize {
        self.end
    }

    /// Gets the length of the [`Span`] in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Checks if the [`Span`] is empty.
    ///
    /// A [`Span`] is empty if the start and end are at the same position.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Gets the complete input the [`Span`] points into.
    pub fn source(&self) -> &'i str {
        self.source
    }

    /// Materializes the text covered by the [`Span`].
    pub fn as_str(&self) -> &'i str {
        &self.source[self.start..self.end]
    }
}

/// A parsed value together with the [`Span`] of input it was parsed from.
///
/// Produced by [`capture_span`](crate::basic::capture_span).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spanned<'i, T> {
    /// The parsed value
    pub value: T,
    /// Input consumed while parsing `value`
    pub span: Span<'i>,
}

impl fmt::Display for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'i> From<Span<'i>> for &'i str {
    fn from(span: Span<'i>) -> &'i str {
        span.as_str()
    }
}
