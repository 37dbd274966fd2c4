//! Java string literals.

use std::fmt::Write;

/// Escape one character for use inside a Java string or char literal.
/// Single quotes are left alone; callers writing char literals escape them.
pub(crate) fn escape_char(c: char, out: &mut String) {
    match c {
        '\u{8}' => out.push_str("\\b"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\u{c}' => out.push_str("\\f"),
        '\r' => out.push_str("\\r"),
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04x}", c as u32);
        }
        c => out.push(c),
    }
}

/// `"value"` with Java escapes. A string containing newlines is split after
/// each one into concatenated literals on continuation lines.
pub fn string_literal(value: &str, indent: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        escape_char(c, &mut out);
        if c == '\n' && chars.peek().is_some() {
            out.push_str("\"\n");
            out.push_str(indent);
            out.push_str(indent);
            out.push_str("+ \"");
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
        assert_eq!(string_literal("a\"b'c\\", "    "), "\"a\\\"b'c\\\\\"");
        assert_eq!(string_literal("tab\there", "    "), "\"tab\\there\"");
        assert_eq!(string_literal("\u{1}", "    "), "\"\\u0001\"");
    }

    #[test]
    fn test_multiline_concatenation() {
        assert_eq!(
            string_literal("one\ntwo\n", "  "),
            "\"one\\n\"\n    + \"two\\n\""
        );
    }
}
