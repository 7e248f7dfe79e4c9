//! # Statement and Word Splitting
//!
//! Quote-aware helpers built on the nesting [`Cursor`]. They only ever split
//! on characters the cursor classifies as code at nesting depth 0, so
//! separators inside quotes, `$( ... )`, `{ ... }`, comments and
//! here-document bodies are left alone.
//!
//! | Function | Splits on | Used for |
//! |----------|-----------|----------|
//! | [`split_statements`] | `;` `&` `|` and newline | statement boundaries |
//! | [`split_words`] | blanks and escaped newlines | command words |
//! | [`find_assignment`] | first `=` | `name=value` alias words |
//! | [`strip_outer_quotes`] | - | alias bodies |

use std::iter::Peekable;

use super::cursor::{CharClass, Classified, Cursor};
use super::dialect::DialectProfile;

/// A top-level statement within a logical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    /// Byte offset of the (trimmed) statement in the scanned text
    pub offset: usize,
    pub text: &'a str,
}

/// Split shell text into top-level statements.
///
/// Comment text at the top level is dropped; comments nested inside a group
/// stay part of their statement. Empty statements (`;;`, `&&`) are skipped.
///
/// # Example
///
/// ```rust,ignore
/// let stmts = split_statements("alias a=1; alias b=2 # both", &BASH);
/// assert_eq!(stmts[0].text, "alias a=1");
/// assert_eq!(stmts[1].text, "alias b=2");
/// ```
pub fn split_statements<'a>(text: &'a str, profile: &'static DialectProfile) -> Vec<Statement<'a>> {
    let mut statements = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev: Option<char> = None;
    let mut cursor = Cursor::new(text, profile, 1);

    while let Some(c) = cursor.next() {
        let boundary = c.depth == 0
            && match c.ch {
                ';' | '|' => c.class == CharClass::Code,
                // `2>&1` and `&>` are redirections
                '&' => {
                    c.class == CharClass::Code
                        && !matches!(prev, Some('>') | Some('<'))
                        && !text[c.offset + 1..].starts_with('>')
                }
                '\n' => c.class != CharClass::Escaped && cursor.is_balanced(),
                _ => false,
            };
        prev = Some(c.ch);

        if boundary {
            push_statement(text, &mut statements, start.take(), c.offset);
        } else if c.class == CharClass::Comment && c.depth == 0 {
            push_statement(text, &mut statements, start.take(), c.offset);
        } else if start.is_none() && !c.ch.is_whitespace() {
            start = Some(c.offset);
        }
    }
    push_statement(text, &mut statements, start, text.len());

    statements
}

fn push_statement<'a>(
    text: &'a str,
    statements: &mut Vec<Statement<'a>>,
    start: Option<usize>,
    end: usize,
) {
    if let Some(start) = start {
        let slice = text[start..end].trim_end();
        if !slice.is_empty() {
            statements.push(Statement {
                offset: start,
                text: slice,
            });
        }
    }
}

/// Split a statement into words on unquoted top-level blanks.
///
/// An escaped newline (line continuation) separates words like a blank.
/// Comment text ends the word list.
///
/// # Example
///
/// ```rust,ignore
/// let words = split_words("alias ll='ls -la' g=\"git st\"", &BASH);
/// assert_eq!(words, vec!["alias", "ll='ls -la'", "g=\"git st\""]);
/// ```
pub fn split_words<'a>(text: &'a str, profile: &'static DialectProfile) -> Vec<&'a str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars: Peekable<Cursor<'_>> = Cursor::new(text, profile, 1).peekable();

    while let Some(c) = chars.next() {
        if c.class == CharClass::Comment && c.depth == 0 {
            break;
        }
        let separator = is_blank(&c) || is_continuation(&c, chars.peek());
        if separator {
            if let Some(s) = start.take() {
                words.push(&text[s..c.offset]);
            }
            if c.class == CharClass::Escape {
                chars.next();
            }
        } else if start.is_none() {
            start = Some(c.offset);
        }
    }

    if let Some(s) = start {
        let end = text.len();
        let word = text[s..end].trim_end();
        if !word.is_empty() {
            words.push(word);
        }
    }

    words
}

fn is_blank(c: &Classified) -> bool {
    c.class == CharClass::Code && c.depth == 0 && c.ch.is_whitespace()
}

fn is_continuation(c: &Classified, next: Option<&Classified>) -> bool {
    c.class == CharClass::Escape && c.depth == 0 && next.map(|n| n.ch) == Some('\n')
}

/// Byte length of a leading `case` arm pattern, closing `)` included.
///
/// Accepts `darwin*)`, `(a|b)` and `*.sh | *.bash)`: every alternative is a
/// single word. `name()`, `$(cmd)` and `(cd dir)` are not patterns.
pub fn case_pattern_len(statement: &str, profile: &'static DialectProfile) -> Option<usize> {
    let mut cursor = Cursor::new(statement, profile, 1);
    if statement.starts_with('(') {
        cursor.next();
    }

    let mut in_word = false;
    let mut after_gap = false;
    for c in cursor {
        match c.class {
            CharClass::Comment => return None,
            CharClass::Code => {}
            _ if after_gap => return None,
            _ => {
                in_word = true;
                continue;
            }
        }
        match c.ch {
            ')' if c.depth == 0 => return in_word.then_some(c.offset + 1),
            '|' if in_word => {
                in_word = false;
                after_gap = false;
            }
            ch if ch.is_whitespace() => after_gap = in_word,
            '(' | ')' | '{' | '}' | ';' | '&' | '|' | '<' | '>' | '=' => return None,
            _ if after_gap => return None,
            _ => in_word = true,
        }
    }
    None
}

/// Byte offset of the first unquoted top-level `=` in a word.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(find_assignment("ll='a=b'", &BASH), Some(2));
/// assert_eq!(find_assignment("'a=b'", &BASH), None);
/// ```
pub fn find_assignment(word: &str, profile: &'static DialectProfile) -> Option<usize> {
    Cursor::new(word, profile, 1)
        .find(|c| c.ch == '=' && c.class == CharClass::Code && c.depth == 0)
        .map(|c| c.offset)
}

/// Remove exactly one layer of quoting from a word.
///
/// The layer is only removed when the whole word is a single quoted segment:
/// `'...'`, `"..."`, or `$'...'` where the dialect has ANSI-C quotes. In
/// dialects with doubled-quote escapes, `'it''s'` is one segment. Anything
/// else (`a'b'`, `'a'"b"`, unquoted words) is returned unchanged. The inside
/// is returned verbatim; escapes are not interpreted.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(strip_outer_quotes("'ls -la'", &BASH), "ls -la");
/// assert_eq!(strip_outer_quotes("'a'\"b\"", &BASH), "'a'\"b\"");
/// ```
pub fn strip_outer_quotes<'a>(word: &'a str, profile: &'static DialectProfile) -> &'a str {
    let (prefix, quote) = if profile.ansi_c_quotes && word.starts_with("$'") {
        (1, '\'')
    } else {
        match word.chars().next() {
            Some(q @ ('\'' | '"')) => (0, q),
            _ => return word,
        }
    };
    if word.len() < prefix + 2 || !word.ends_with(quote) {
        return word;
    }

    // Quotes nested in `"$( ... )"` sit at depth > 0 and belong to the inner command
    let delimiters: Vec<usize> = Cursor::new(word, profile, 1)
        .filter(|c| c.class == CharClass::QuoteDelim && c.depth == 0 && c.ch == quote)
        .map(|c| c.offset)
        .collect();

    let last = word.len() - 1;
    let n = delimiters.len();
    if n < 2 || n % 2 != 0 || delimiters[0] != prefix || delimiters[n - 1] != last {
        return word;
    }

    // Interior delimiters must pair up as doubled quotes: `''` or `""`
    let bytes = word.as_bytes();
    let doubled = delimiters[1..n - 1].chunks(2).all(|pair| {
        profile.doubled_quote_escapes
            && pair[1] == pair[0] + 1
            && bytes[pair[0]] == quote as u8
            && bytes[pair[1]] == quote as u8
    });
    if !doubled {
        return word;
    }

    &word[prefix + 1..last]
}

/// Physical line of a byte offset, given the line of offset 0.
pub fn line_at(text: &str, first_line: usize, offset: usize) -> usize {
    first_line + text[..offset].matches('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dialect::{BASH, PWSH};

    fn stmt_texts<'a>(text: &'a str) -> Vec<&'a str> {
        split_statements(text, &BASH).iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_split_statements() {
        assert_eq!(
            stmt_texts("alias a=1; alias b=2"),
            vec!["alias a=1", "alias b=2"]
        );
        assert_eq!(
            stmt_texts("test -f x && alias a=1 || true"),
            vec!["test -f x", "alias a=1", "true"]
        );
        assert_eq!(stmt_texts("alias a='x; y'"), vec!["alias a='x; y'"]);
        assert_eq!(stmt_texts("cmd >/dev/null 2>&1"), vec!["cmd >/dev/null 2>&1"]);
    }

    #[test]
    fn test_split_statements_drops_top_level_comment() {
        assert_eq!(stmt_texts("alias a=1 # ; alias b=2"), vec!["alias a=1"]);
        assert_eq!(stmt_texts("# only a comment"), Vec::<&str>::new());
    }

    #[test]
    fn test_split_statements_keeps_group_intact() {
        let stmts = stmt_texts("f() { a; b | c; }; alias x=y");
        assert_eq!(stmts, vec!["f() { a; b | c; }", "alias x=y"]);
    }

    #[test]
    fn test_split_statements_newlines_in_inner_text() {
        let stmts = split_statements("\n  alias a=1\n  alias b=2\n", &BASH);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[1].text, "alias b=2");
        assert_eq!(line_at("\n  alias a=1\n  alias b=2\n", 1, stmts[1].offset), 3);
    }

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words("alias ll='ls -la'  g=\"git st\"", &BASH),
            vec!["alias", "ll='ls -la'", "g=\"git st\""]
        );
        assert_eq!(
            split_words("alias d=$(date +%F) e=x", &BASH),
            vec!["alias", "d=$(date +%F)", "e=x"]
        );
        assert_eq!(
            split_words("alias a=1 \\\n  b=2", &BASH),
            vec!["alias", "a=1", "b=2"]
        );
        assert_eq!(split_words("alias a=1 # b=2", &BASH), vec!["alias", "a=1"]);
        assert_eq!(
            split_words("alias now=`date +%s` x=\"$(a \"b c\")\"", &BASH),
            vec!["alias", "now=`date +%s`", "x=\"$(a \"b c\")\""]
        );
    }

    #[test]
    fn test_case_pattern_len() {
        assert_eq!(case_pattern_len("darwin*) alias ls='ls -G'", &BASH), Some(8));
        assert_eq!(case_pattern_len("(a|b) x", &BASH), Some(5));
        assert_eq!(case_pattern_len("*.sh | *.bash) x", &BASH), Some(14));
        assert_eq!(case_pattern_len("\"a b\") x", &BASH), Some(6));
        assert_eq!(case_pattern_len("f() { x; }", &BASH), None);
        assert_eq!(case_pattern_len("(cd dir)", &BASH), None);
        assert_eq!(case_pattern_len("echo $(date)", &BASH), None);
        assert_eq!(case_pattern_len("alias a='x)'", &BASH), None);
        assert_eq!(case_pattern_len(") x", &BASH), None);
    }

    #[test]
    fn test_find_assignment() {
        assert_eq!(find_assignment("ll='a=b'", &BASH), Some(2));
        assert_eq!(find_assignment("'a=b'", &BASH), None);
        assert_eq!(find_assignment("plain", &BASH), None);
    }

    #[test]
    fn test_strip_outer_quotes() {
        assert_eq!(strip_outer_quotes("'ls -la'", &BASH), "ls -la");
        assert_eq!(strip_outer_quotes("\"git status\"", &BASH), "git status");
        assert_eq!(strip_outer_quotes("$'a\\tb'", &BASH), "a\\tb");
        assert_eq!(strip_outer_quotes("''", &BASH), "");
        assert_eq!(strip_outer_quotes("ls", &BASH), "ls");
        assert_eq!(strip_outer_quotes("'a'\"b\"", &BASH), "'a'\"b\"");
        assert_eq!(strip_outer_quotes("'a'b", &BASH), "'a'b");
        assert_eq!(
            strip_outer_quotes("\"echo 'inner'\"", &BASH),
            "echo 'inner'"
        );
        assert_eq!(
            strip_outer_quotes("\"$(date '+%s' \"x\")\"", &BASH),
            "$(date '+%s' \"x\")"
        );
        assert_eq!(strip_outer_quotes("`date`", &BASH), "`date`");
        assert_eq!(strip_outer_quotes("'a'\"'\"'b'", &BASH), "'a'\"'\"'b'");
    }

    #[test]
    fn test_strip_outer_quotes_doubled() {
        assert_eq!(strip_outer_quotes("'it''s'", &PWSH), "it''s");
        assert_eq!(strip_outer_quotes("'it''s'", &BASH), "'it''s'");
    }
}
