//! Conversion between editor positions and flat byte offsets.

use crate::Position;

/// Line index over a document's text.
///
/// Maps byte offsets to line/column [`Position`]s and back. Columns are
/// counted in UTF-16 code units, the unit browser editors report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Create a new line index from source text
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self { text, line_starts }
    }

    /// Get the byte offset of the start of a line
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Get the number of lines
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a line without its terminator.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = self.line_start(line)?;
        let end = self
            .line_start(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        let text = &self.text[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Convert an editor position to a byte offset.
    ///
    /// A column past the end of the line is clipped to the line end, the way
    /// editors clip positions. Returns `None` for a line past the end of the
    /// document.
    #[must_use]
    pub fn offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let line_start = self.line_start(line)?;
        let text = self.line_text(line)?;

        let mut units = 0usize;
        for (byte, c) in text.char_indices() {
            if units >= position.character as usize {
                return Some(line_start + byte);
            }
            units += c.len_utf16();
        }

        Some(line_start + text.len())
    }

    /// Convert a byte offset to an editor position.
    ///
    /// Offsets past the end of the text map to the end of the last line.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        let line_start = self.line_starts[line];
        let character: usize = self.text[line_start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();

        Position::new(line as u32, character as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_new() {
        let text = "line 1\nline 2\nline 3";
        let index = LineIndex::new(text);

        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(0), Some(0));
        assert_eq!(index.line_start(1), Some(7));
        assert_eq!(index.line_start(2), Some(14));
        assert_eq!(index.line_start(3), None);
    }

    #[test]
    fn test_line_text_strips_terminators() {
        let index = LineIndex::new("query A {\r\n  f\r\n}");
        assert_eq!(index.line_text(0), Some("query A {"));
        assert_eq!(index.line_text(1), Some("  f"));
        assert_eq!(index.line_text(2), Some("}"));
        assert_eq!(index.line_text(3), None);
    }

    #[test]
    fn test_offset_round_trips_ascii() {
        let text = "query A {\n  field\n}";
        let index = LineIndex::new(text);

        assert_eq!(index.offset(Position::new(1, 2)), Some(12));
        assert_eq!(&text[12..17], "field");
        assert_eq!(index.position(12), Position::new(1, 2));
    }

    #[test]
    fn test_offset_clips_long_columns() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(Position::new(0, 99)), Some(2));
        assert_eq!(index.offset(Position::new(1, 99)), Some(5));
        assert_eq!(index.offset(Position::new(2, 0)), None);
    }

    #[test]
    fn test_offset_counts_utf16_units() {
        // "é" is one UTF-16 unit and two bytes; "😀" is two units and four bytes.
        let text = "# é😀\n{ f }";
        let index = LineIndex::new(text);

        assert_eq!(index.offset(Position::new(0, 3)), Some(4));
        assert_eq!(index.offset(Position::new(0, 5)), Some(8));
        assert_eq!(index.position(8), Position::new(0, 5));
        assert_eq!(index.offset(Position::new(1, 2)), Some(11));
    }

    #[test]
    fn test_position_past_end() {
        let index = LineIndex::new("{ f }");
        assert_eq!(index.position(100), Position::new(0, 5));
    }
}
