//! Kotlin string literals.

use std::fmt::Write;

fn escape_char(c: char, out: &mut String) {
    match c {
        '\u{8}' => out.push_str("\\b"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        // Templates would otherwise be expanded.
        '$' => out.push_str("\\$"),
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04x}", c as u32);
        }
        c => out.push(c),
    }
}

/// `"value"` with Kotlin escapes. A string containing newlines is split
/// after each one; the `+` stays at the end of the line so the expression
/// continues.
pub fn string_literal(value: &str, indent: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        escape_char(c, &mut out);
        if c == '\n' && chars.peek().is_some() {
            out.push_str("\" +\n");
            out.push_str(indent);
            out.push_str(indent);
            out.push('"');
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes() {
        assert_eq!(string_literal("Hello, World!", "    "), "\"Hello, World!\"");
        assert_eq!(string_literal("cost: $5", "    "), "\"cost: \\$5\"");
        assert_eq!(string_literal("a\"b\\", "    "), "\"a\\\"b\\\\\"");
    }

    #[test]
    fn test_multiline_concatenation() {
        assert_eq!(
            string_literal("one\ntwo", "  "),
            "\"one\\n\" +\n    \"two\""
        );
    }
}
