//! Cursor markers for editor gesture tests.
//!
//! Tests that simulate a pointer gesture mark the pointer position in the
//! document with `*` (or `$1`, `$2`, ... for several positions). The helpers
//! strip the markers and report the positions the way an editor would, with
//! columns in UTF-16 code units.

use graphiql_types::Position;

/// Extract the position marked with `*`.
///
/// # Example
///
/// ```
/// use graphiql_test_utils::extract_cursor;
///
/// let (source, pos) = extract_cursor("query {\n  ti*tle\n}");
/// assert_eq!(source, "query {\n  title\n}");
/// assert_eq!((pos.line, pos.character), (1, 4));
/// ```
///
/// # Panics
///
/// Panics if the input does not contain exactly one `*` marker.
pub fn extract_cursor(input: &str) -> (String, Position) {
    let marker_count = input.matches('*').count();
    assert!(
        marker_count == 1,
        "extract_cursor: input must contain exactly one '*' marker, found {marker_count}"
    );

    let mut tracker = Tracker::with_capacity(input.len());
    let mut found = None;
    for ch in input.chars() {
        if ch == '*' {
            found = Some(tracker.position());
        } else {
            tracker.push(ch);
        }
    }

    let position = found.expect("marker counted above");
    (tracker.text, position)
}

/// Extract positions marked with `$1`, `$2`, ... in marker order.
///
/// ```
/// use graphiql_test_utils::extract_cursors;
///
/// let (source, positions) = extract_cursors("query A { $1a } query B { $2b }");
/// assert_eq!(source, "query A { a } query B { b }");
/// assert_eq!(positions[1].character, 22);
/// ```
pub fn extract_cursors(input: &str) -> (String, Vec<Position>) {
    let mut tracker = Tracker::with_capacity(input.len());
    let mut markers: Vec<(u32, Position)> = Vec::new();

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '$' {
            if let Some(number) = chars.peek().and_then(|c| c.to_digit(10)) {
                chars.next();
                markers.push((number, tracker.position()));
                continue;
            }
        }
        tracker.push(ch);
    }

    markers.sort_by_key(|(number, _)| *number);
    let positions = markers.into_iter().map(|(_, pos)| pos).collect();
    (tracker.text, positions)
}

struct Tracker {
    text: String,
    line: u32,
    character: u32,
}

impl Tracker {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            line: 0,
            character: 0,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.character)
    }

    fn push(&mut self, ch: char) {
        self.text.push(ch);
        if ch == '\n' {
            self.line += 1;
            self.character = 0;
        } else {
            self.character += ch.len_utf16() as u32;
        }
    }
}
