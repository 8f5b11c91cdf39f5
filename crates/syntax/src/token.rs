//! Locating the lexical token under a pointer position.

use apollo_parser::cst::CstNode;
use graphiql_types::{CursorSpan, LineIndex, Position};

/// Span of the token under `position`, clipped to the position's line.
///
/// Follows the convention of browser code editors: when the column sits on
/// a boundary between two tokens, the token that ends at the column wins.
/// A position on an empty line, or past the last token of a line, yields an
/// empty span at the position. Returns `None` only when the line does not
/// exist.
#[must_use]
pub fn token_span_at(text: &str, position: Position) -> Option<CursorSpan> {
    let line_index = LineIndex::new(text);
    let offset = line_index.offset(position)?;
    let line = position.line as usize;
    let line_start = line_index.line_start(line)?;
    let line_end = line_start + line_index.line_text(line)?.len();

    let tree = apollo_parser::Parser::new(text).parse();

    let mut following = None;
    for element in tree.document().syntax().descendants_with_tokens() {
        let apollo_parser::SyntaxElement::Token(token) = element else {
            continue;
        };
        let range = token.text_range();
        let start = usize::from(range.start()).max(line_start);
        let end = usize::from(range.end()).min(line_end);
        if start >= end {
            continue;
        }

        if start < offset && offset <= end {
            return Some(CursorSpan::new(start, end));
        }
        if following.is_none() && start == offset {
            following = Some(CursorSpan::new(start, end));
        }
    }

    Some(following.unwrap_or_else(|| CursorSpan::at(offset)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_text(text: &str, position: Position) -> &str {
        let span = token_span_at(text, position).unwrap();
        &text[span.start()..span.end()]
    }

    #[test]
    fn test_token_inside_word() {
        let text = "query GET_PAGES {\n  pages {\n    title\n  }\n}";
        assert_eq!(token_text(text, Position::new(2, 6)), "title");
        assert_eq!(token_text(text, Position::new(0, 8)), "GET_PAGES");
    }

    #[test]
    fn test_boundary_prefers_preceding_token() {
        let text = "query A{f}";
        // Column 7 sits between `A` and `{`.
        assert_eq!(token_text(text, Position::new(0, 7)), "A");
    }

    #[test]
    fn test_line_start_takes_following_token() {
        let text = "query A{f}";
        assert_eq!(token_text(text, Position::new(0, 0)), "query");
    }

    #[test]
    fn test_tokens_are_clipped_to_line() {
        let text = "query A {\n\n  f\n}";
        let span = token_span_at(text, Position::new(1, 0)).unwrap();
        assert!(span.start() == span.end());
    }

    #[test]
    fn test_line_out_of_range() {
        assert!(token_span_at("{ f }", Position::new(3, 0)).is_none());
    }

    #[test]
    fn test_past_end_of_line() {
        let text = "{ f }";
        let span = token_span_at(text, Position::new(0, 40)).unwrap();
        assert_eq!(span, CursorSpan::new(4, 5));
    }
}
