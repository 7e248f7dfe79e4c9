//! Logical-line assembly
//!
//! A logical line is the smallest unit the extractor looks at: one or more
//! physical lines joined because a quote, group, here-document or escaped
//! newline was still open at the end of a physical line.

use super::cursor::{CharClass, Cursor, Truncation};
use super::dialect::DialectProfile;

/// One complete (or truncated) unit of shell text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Verbatim physical lines joined with `\n`
    pub text: String,
    /// First physical line (1-based)
    pub line: usize,
    /// Last physical line (1-based)
    pub end_line: usize,
    /// Set when end of input was reached inside an open construct
    pub truncation: Option<Truncation>,
}

impl LogicalLine {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        let text = text.into();
        let end_line = line + text.matches('\n').count();
        Self {
            text,
            line,
            end_line,
            truncation: None,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }
}

/// Lazy iterator of logical lines over a piece of shell text.
///
/// Cloning the reader clones its position; building a new one restarts from
/// the beginning.
#[derive(Debug, Clone)]
pub struct LineReader<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    start: usize,
    start_line: usize,
    finished: bool,
}

impl<'a> LineReader<'a> {
    pub fn new(text: &'a str, profile: &'static DialectProfile) -> Self {
        Self {
            text,
            cursor: Cursor::new(text, profile, 1),
            start: 0,
            start_line: 1,
            finished: false,
        }
    }
}

impl Iterator for LineReader<'_> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<LogicalLine> {
        if self.finished {
            return None;
        }

        while let Some(c) = self.cursor.next() {
            if c.ch != '\n' || c.class == CharClass::Escaped || !self.cursor.is_balanced() {
                continue;
            }

            let text = &self.text[self.start..c.offset];
            let line = self.start_line;
            self.start = c.offset + 1;
            self.start_line = c.line + 1;

            if text.trim().is_empty() {
                continue;
            }
            return Some(LogicalLine {
                text: text.to_string(),
                line,
                end_line: c.line,
                truncation: None,
            });
        }

        self.finished = true;
        let text = &self.text[self.start..];
        let truncation = self.cursor.open_construct();
        if text.trim().is_empty() && truncation.is_none() {
            return None;
        }

        Some(LogicalLine {
            text: text.to_string(),
            line: self.start_line,
            end_line: self.cursor.line(),
            truncation,
        })
    }
}
