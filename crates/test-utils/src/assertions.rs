//! Formatting helpers for snapshot assertions.

/// Format a list of messages as a numbered list for snapshot testing.
///
/// # Example
///
/// ```
/// use graphiql_test_utils::format_messages;
///
/// assert_eq!(format_messages(&["a", "b"]), "[1] a\n[2] b");
/// assert_eq!(format_messages::<&str>(&[]), "(none)");
/// ```
pub fn format_messages<T: AsRef<str>>(messages: &[T]) -> String {
    if messages.is_empty() {
        return String::from("(none)");
    }

    messages
        .iter()
        .enumerate()
        .map(|(i, m)| format!("[{}] {}", i + 1, m.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_messages_single() {
        let formatted = format_messages(&["Network error: refused"]);
        assert_eq!(formatted, "[1] Network error: refused");
    }

    #[test]
    fn test_format_messages_owned() {
        let messages = vec![String::from("one"), String::from("two")];
        assert_eq!(format_messages(&messages), "[1] one\n[2] two");
    }
}
