//! Offset and position types for source locations.

/// Byte offset range in a query document.
///
/// Definition spans produced by the resolver are `OffsetRange`s. Byte offsets
/// are converted to line/column [`Position`]s only at the editor boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl OffsetRange {
    /// Create a new offset range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a zero-width range at a specific offset.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns the length of this range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if this is a zero-width range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `span` lies entirely within this range.
    ///
    /// Both ends are inclusive: a cursor span that touches the first or the
    /// last byte boundary of the range is still contained.
    #[must_use]
    pub const fn encloses(&self, span: CursorSpan) -> bool {
        self.start <= span.start() && self.end >= span.end()
    }
}

impl std::fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A `(start, end)` byte offset pair taken from the token under the pointer.
///
/// The constructor orders its arguments, so `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorSpan {
    start: usize,
    end: usize,
}

impl CursorSpan {
    /// Create a span from two offsets, in either order.
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Create a zero-width span at a specific offset.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Start byte offset (inclusive)
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End byte offset (exclusive)
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }
}

impl From<OffsetRange> for CursorSpan {
    fn from(range: OffsetRange) -> Self {
        Self::new(range.start, range.end)
    }
}

impl std::fmt::Display for CursorSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Position in a query document (editor coordinates, 0-indexed).
///
/// - `line` is 0-indexed (first line is 0)
/// - `character` is 0-indexed UTF-16 code units from line start
///
/// Browser text editors report columns in UTF-16 code units, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: u32,
    /// Character offset within the line (0-indexed, UTF-16 code units)
    pub character: u32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.character.cmp(&other.character),
            ord => ord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_range_creation() {
        let range = OffsetRange::new(10, 20);
        assert_eq!(range.start, 10);
        assert_eq!(range.end, 20);
        assert_eq!(range.len(), 10);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_offset_range_at() {
        let range = OffsetRange::at(15);
        assert_eq!(range.len(), 0);
        assert!(range.is_empty());
    }

    #[test]
    fn test_offset_range_display() {
        let range = OffsetRange::new(10, 20);
        assert_eq!(format!("{range}"), "10..20");
    }

    #[test]
    fn test_encloses_is_inclusive_at_both_ends() {
        let range = OffsetRange::new(5, 10);
        assert!(range.encloses(CursorSpan::new(5, 10)));
        assert!(range.encloses(CursorSpan::at(5)));
        assert!(range.encloses(CursorSpan::at(10)));
        assert!(range.encloses(CursorSpan::new(6, 8)));
        assert!(!range.encloses(CursorSpan::new(4, 6)));
        assert!(!range.encloses(CursorSpan::new(9, 11)));
        assert!(!range.encloses(CursorSpan::at(11)));
    }

    #[test]
    fn test_cursor_span_orders_offsets() {
        let span = CursorSpan::new(9, 3);
        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 9);
        assert_eq!(format!("{span}"), "3..9");
    }

    #[test]
    fn test_cursor_span_from_offset_range() {
        let span = CursorSpan::from(OffsetRange::new(2, 4));
        assert_eq!(span, CursorSpan::new(2, 4));
    }

    #[test]
    fn test_position_ordering() {
        let p1 = Position::new(0, 5);
        let p2 = Position::new(0, 10);
        let p3 = Position::new(1, 0);

        assert!(p1 < p2);
        assert!(p2 < p3);
        assert!(p1 < p3);
        assert_eq!(p1.cmp(&p1), std::cmp::Ordering::Equal);
    }
}
