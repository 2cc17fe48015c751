//! Source spans for syntax nodes.
//!
//! Every node in a Sylva tree carries a [`Span`]: a half-open pair of 0-based
//! character offsets into the immutable source text. Spans are constructed
//! once from the external engine's coordinates and never mutated.

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// A span of content in a source text.
///
/// `start` is inclusive, `end` is exclusive. Invariant: `start <= end`,
/// enforced by [`Span::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    /// The starting character index (0-based) of the span.
    pub start: usize,
    /// The ending character index (0-based, exclusive) of the span.
    pub end: usize,
}

impl Span {
    /// Creates a span, rejecting inverted offset pairs.
    ///
    /// This should never fail on well-formed engine output; the check exists
    /// so a bad span surfaces at construction rather than as a corrupt tree.
    pub fn new(start: usize, end: usize) -> Result<Self, ParseError> {
        if start > end {
            return Err(ParseError::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Adapter for engines that report token coordinates as an inclusive
    /// start offset and an inclusive-or-absent stop offset. pest spans are
    /// already half-open, so in-crate construction goes through
    /// [`Span::from_pest`]; this stays for callers translating coordinates
    /// from such an engine.
    ///
    /// The exclusive end is `stop + 1`; an absent stop denotes an empty
    /// match, so the span collapses to `start..start`.
    pub fn from_inclusive(start: usize, stop: Option<usize>) -> Result<Self, ParseError> {
        match stop {
            Some(stop) => Self::new(start, stop + 1),
            None => Self::new(start, start),
        }
    }

    /// Creates a span from a pest engine span, which is already half-open.
    pub fn from_pest(span: pest::Span<'_>) -> Self {
        Self {
            start: span.start(),
            end: span.end(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` falls inside this span.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether `other` lies entirely within this span. Used by the child
    /// containment checks in [`crate::node::check_invariants`].
    pub fn contains_span(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_inverted_span() {
        assert!(Span::new(5, 3).is_err());
        assert!(Span::new(3, 3).is_ok());
    }

    #[test]
    fn from_inclusive_maps_stop_to_exclusive_end() {
        let span = Span::from_inclusive(2, Some(4)).unwrap();
        assert_eq!(span, Span { start: 2, end: 5 });
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn from_inclusive_absent_stop_is_empty() {
        let span = Span::from_inclusive(7, None).unwrap();
        assert_eq!(span, Span { start: 7, end: 7 });
        assert!(span.is_empty());
    }

    #[test]
    fn containment() {
        let outer = Span { start: 2, end: 10 };
        assert!(outer.contains(2));
        assert!(!outer.contains(10));
        assert!(outer.contains_span(Span { start: 2, end: 10 }));
        assert!(outer.contains_span(Span { start: 4, end: 6 }));
        assert!(!outer.contains_span(Span { start: 1, end: 6 }));
        assert!(!outer.contains_span(Span { start: 4, end: 11 }));
    }
}
