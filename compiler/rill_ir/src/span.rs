//! Source location spans.
//!
//! Compact 8-byte byte-offset ranges into the original source text.

use std::fmt;

/// Source location span.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from source start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if another span is fully contained within this span.
    #[inline]
    pub fn contains_span(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Convert to a `std::ops::Range` for slicing source text.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

crate::static_assert_size!(Span, 8);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn span_basic() {
        let span = Span::new(10, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
    }

    #[test]
    fn span_merge() {
        let a = Span::new(10, 20);
        let b = Span::new(15, 30);
        assert_eq!(a.merge(b), Span::new(10, 30));
    }

    #[test]
    fn span_merge_disjoint_reversed() {
        let a = Span::new(20, 30);
        let b = Span::new(0, 10);
        assert_eq!(a.merge(b), Span::new(0, 30));
    }

    #[test]
    fn span_contains_span() {
        let outer = Span::new(5, 25);
        assert!(outer.contains_span(Span::new(5, 25)));
        assert!(outer.contains_span(Span::new(10, 20)));
        assert!(!outer.contains_span(Span::new(4, 20)));
        assert!(!outer.contains_span(Span::new(10, 26)));
    }

    #[test]
    fn span_point() {
        let p = Span::point(42);
        assert!(p.is_empty());
        assert_eq!(p.start, 42);
        assert_eq!(p.end, 42);
    }

    #[test]
    fn span_display() {
        assert_eq!(format!("{}", Span::new(3, 9)), "3..9");
        assert_eq!(format!("{:?}", Span::new(3, 9)), "3..9");
    }

    #[test]
    fn span_to_range() {
        let source = "hello world";
        assert_eq!(&source[Span::new(6, 11).to_range()], "world");
    }
}
