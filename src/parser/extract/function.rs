//! # Function Definitions
//!
//! Header recognition, body matching and body normalization.
//!
//! ## Recognized Forms
//!
//! ```text
//! function name { ... }          bash, zsh
//! function name() { ... }        bash, zsh
//! name() { ... }                 bash, zsh, sh
//! name() ( ... )                 bash, zsh, sh (subshell body)
//! function Verb-Noun(...) { }    pwsh (also `filter`, `global:` prefix)
//! ```
//!
//! The body is found by running the nesting cursor from the opening
//! delimiter until the depth returns to zero, so quoted or commented braces
//! never end a body early.

use super::super::cursor::Cursor;
use super::super::dialect::DialectProfile;

/// A recognized function header within a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionHeader<'a> {
    /// Name candidate with any scope prefix removed, not yet validated
    pub name: &'a str,
    /// Statement text after the header
    pub rest: &'a str,
}

/// What follows a function header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    /// A delimited block; `inner` is the text strictly between the delimiters
    Block { inner: &'a str, inner_offset: usize },
    /// Nothing follows the header on this logical line
    Missing,
    /// Something other than a block follows
    NotBlock,
}

/// Try to read a function header at the start of a statement.
///
/// Keyword forms are tried before the bare `name()` form.
pub fn try_parse_header<'a>(
    statement: &'a str,
    profile: &'static DialectProfile,
) -> Option<FunctionHeader<'a>> {
    let caps = profile
        .keyword_header
        .and_then(|re| re.captures(statement))
        .or_else(|| profile.bare_header.and_then(|re| re.captures(statement)))?;

    let name = caps.get(1)?.as_str();
    let end = caps.get(0)?.end();

    Some(FunctionHeader {
        name: profile.strip_scope(name),
        rest: &statement[end..],
    })
}

/// Match a brace (or subshell) body at the start of `text`.
///
/// # Returns
///
/// - `Body::Block` with the text between the outer delimiters
/// - `Body::Missing` when `text` is blank
/// - `Body::NotBlock` when `text` does not open a block, or the block never
///   closes
pub fn match_body<'a>(text: &'a str, profile: &'static DialectProfile) -> Body<'a> {
    let trimmed = text.trim_start();
    let lead = text.len() - trimmed.len();

    match trimmed.chars().next() {
        None => return Body::Missing,
        Some('{') => {}
        Some('(') if profile.subshell_bodies => {}
        Some(_) => return Body::NotBlock,
    }

    let close = Cursor::new(trimmed, profile, 1)
        .skip(1)
        .find(|c| c.depth == 0)
        .map(|c| c.offset);

    match close {
        Some(close) => Body::Block {
            inner: &trimmed[1..close],
            inner_offset: lead + 1,
        },
        None => Body::NotBlock,
    }
}

/// Normalize the text between a body's delimiters.
///
/// - Single-line bodies are trimmed.
/// - Multi-line bodies drop a blank first line (the rest of the `{` line) and
///   a blank last line (the indent before `}`), are dedented by the common
///   leading whitespace of their non-blank lines, lose trailing whitespace on
///   every line, and end with exactly one newline.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(normalize_body(" echo hi; "), "echo hi;");
/// assert_eq!(normalize_body("\n    echo \"hi\"\n"), "echo \"hi\"\n");
/// ```
pub fn normalize_body(inner: &str) -> String {
    if !inner.contains('\n') {
        return inner.trim().to_string();
    }

    let mut lines: Vec<&str> = inner.split('\n').collect();
    if lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let indent = common_indent(&lines);
    let mut body = String::new();
    for line in lines {
        if !line.trim().is_empty() {
            body.push_str(line[indent.len()..].trim_end());
        }
        body.push('\n');
    }
    body
}

/// Longest run of leading blanks shared by all non-blank lines
fn common_indent<'a>(lines: &[&'a str]) -> &'a str {
    let mut common: Option<&'a str> = None;

    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        let text = line.trim_start_matches(|c| c == ' ' || c == '\t');
        let leading = &line[..line.len() - text.len()];
        common = Some(match common {
            None => leading,
            Some(prev) => {
                let shared = prev
                    .bytes()
                    .zip(leading.bytes())
                    .take_while(|(a, b)| a == b)
                    .count();
                &prev[..shared]
            }
        });
    }

    common.unwrap_or("")
}
