//! Buffers text after a wrapping point until it is known whether the line
//! overflows the column limit.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlushType {
    Wrap,
    Space,
    Empty,
}

/// Appends text to an owned buffer, turning pending wrapping points into a
/// newline plus indentation when the current line would cross the limit.
#[derive(Debug)]
pub struct LineWrapper {
    out: String,
    indent: &'static str,
    column_limit: usize,
    /// Text written since the last wrapping point, not yet flushed.
    buffer: String,
    /// Characters since the most recent newline, including the buffer.
    column: usize,
    /// Indent levels to write after a wrap; only meaningful while buffering.
    indent_level: usize,
    next_flush: Option<FlushType>,
}

impl LineWrapper {
    pub fn new(indent: &'static str, column_limit: usize) -> Self {
        Self {
            out: String::new(),
            indent,
            column_limit,
            buffer: String::new(),
            column: 0,
            indent_level: 0,
            next_flush: None,
        }
    }

    /// The last character written, including buffered text.
    pub fn last_char(&self) -> Option<char> {
        self.buffer.chars().last().or_else(|| self.out.chars().last())
    }

    pub fn append(&mut self, value: &str) {
        if let Some(next_flush) = self.next_flush {
            let next_newline = value.find('\n');
            let width = value.chars().count();

            // Nothing crosses the limit yet; decide later.
            if next_newline.is_none() && self.column.saturating_add(width) <= self.column_limit {
                self.buffer.push_str(value);
                self.column += width;
                return;
            }

            let wrap = match next_newline {
                None => true,
                Some(at) => self.column.saturating_add(value[..at].chars().count()) > self.column_limit,
            };
            self.flush(if wrap { FlushType::Wrap } else { next_flush });
        }

        self.out.push_str(value);
        self.column = match value.rfind('\n') {
            Some(last_newline) => value[last_newline + 1..].chars().count(),
            None => self.column + value.chars().count(),
        };
    }

    /// Emit either a space or a newline.
    pub fn wrapping_space(&mut self, indent_level: usize) {
        if let Some(next_flush) = self.next_flush {
            self.flush(next_flush);
        }
        // Counted now, written on flush.
        self.column += 1;
        self.next_flush = Some(FlushType::Space);
        self.indent_level = indent_level;
    }

    /// Emit a newline if the line would otherwise overflow, else nothing.
    pub fn zero_width_space(&mut self, indent_level: usize) {
        if self.column == 0 {
            return;
        }
        if let Some(next_flush) = self.next_flush {
            self.flush(next_flush);
        }
        self.next_flush = Some(FlushType::Empty);
        self.indent_level = indent_level;
    }

    fn flush(&mut self, flush_type: FlushType) {
        match flush_type {
            FlushType::Wrap => {
                self.out.push('\n');
                for _ in 0..self.indent_level {
                    self.out.push_str(self.indent);
                }
                self.column = self.indent_level * self.indent.chars().count()
                    + self.buffer.chars().count();
            }
            FlushType::Space => self.out.push(' '),
            FlushType::Empty => {}
        }
        self.out.push_str(&self.buffer);
        self.buffer.clear();
        self.indent_level = 0;
        self.next_flush = None;
    }

    /// Flush pending text and return everything written.
    pub fn finish(mut self) -> String {
        if let Some(next_flush) = self.next_flush {
            self.flush(next_flush);
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_keeps_spaces() {
        let mut w = LineWrapper::new("    ", usize::MAX);
        w.append("a");
        w.wrapping_space(2);
        w.append("b");
        assert_eq!(w.finish(), "a b");
    }

    #[test]
    fn test_wraps_when_overflowing() {
        let mut w = LineWrapper::new("  ", 10);
        w.append("aaaaaa");
        w.wrapping_space(1);
        w.append("bbbbbb");
        assert_eq!(w.finish(), "aaaaaa\n  bbbbbb");
    }

    #[test]
    fn test_zero_width_space() {
        let mut w = LineWrapper::new("  ", 8);
        w.append("aaaaa");
        w.zero_width_space(1);
        w.append("bbbbb");
        assert_eq!(w.finish(), "aaaaa\n  bbbbb");

        let mut w = LineWrapper::new("  ", 80);
        w.append("a");
        w.zero_width_space(1);
        w.append("b");
        assert_eq!(w.finish(), "ab");
    }

    #[test]
    fn test_last_char_sees_buffer() {
        let mut w = LineWrapper::new("  ", 80);
        w.append("x\n");
        assert_eq!(w.last_char(), Some('\n'));
        w.wrapping_space(0);
        w.append("y");
        assert_eq!(w.last_char(), Some('y'));
    }
}
