//! # Nesting Cursor
//!
//! A character-level state machine that classifies shell text without
//! parsing it. Every other stage of the scanner (logical-line assembly,
//! statement and word splitting, brace matching, quote stripping) is a loop
//! over a [`Cursor`] that looks only at characters classified as
//! [`CharClass::Code`].
//!
//! ## States
//!
//! | Mode | Entered by | Left by | Escapes |
//! |------|------------|---------|---------|
//! | Code | start | - | profile escape char |
//! | Single | `'` | `'` | none |
//! | Double | `"` | `"` | profile escape char |
//! | AnsiC | `$'` | `'` | `\` |
//! | Backtick | `` ` `` | `` ` `` | `\` |
//! | Comment | `#` at word start | newline | none |
//! | BlockComment | `<#` | `#>` | none |
//! | HereDoc | newline after `<<WORD` | line equal to `WORD` | none |
//! | HereString | `@"` / `@'` | `"@` / `'@` at line start | none |
//!
//! Single quotes are not recursive: nothing inside them is interpreted, which
//! is why this is a state value and not a recursive descent. Quoting inside a
//! backtick substitution is left to the inner shell.
//!
//! Brace and parenthesis nesting is a stack of openers with the line each was
//! opened on. A closer only pops a matching opener, so the lone `)` of a
//! `case` pattern inside a function body leaves the brace depth alone.
//!
//! `$(` inside double quotes opens a group that remembers the quote it
//! interrupted: its contents are code again, and the matching `)` resumes the
//! double quote. This is the only place where quote modes nest.

use std::collections::VecDeque;

use super::dialect::DialectProfile;

/// A construct that can be left open at end of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    SingleQuote,
    DoubleQuote,
    AnsiCQuote,
    Backtick,
    Brace,
    Paren,
    HereDoc,
    BlockComment,
    HereString,
}

impl std::fmt::Display for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Construct::SingleQuote => "single quote",
            Construct::DoubleQuote => "double quote",
            Construct::AnsiCQuote => "$'...' quote",
            Construct::Backtick => "backquote",
            Construct::Brace => "brace",
            Construct::Paren => "parenthesis",
            Construct::HereDoc => "here-document",
            Construct::BlockComment => "block comment",
            Construct::HereString => "here-string",
        };
        write!(f, "{}", name)
    }
}

/// Where an unterminated construct began
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub construct: Construct,
    pub line: usize,
}

/// Classification of one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Unquoted, unescaped shell syntax
    Code,
    /// An opening or closing quote character
    QuoteDelim,
    /// Inside quotes
    Quoted,
    /// An active escape character
    Escape,
    /// A character made literal by the preceding escape
    Escaped,
    Comment,
    /// Here-document or here-string body
    HereBody,
}

/// One classified character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    /// Byte offset in the scanned text
    pub offset: usize,
    pub ch: char,
    pub class: CharClass,
    /// Physical line the character is on
    pub line: usize,
    /// Brace/paren depth after this character
    pub depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Single,
    Double,
    AnsiC,
    Backtick,
    Comment,
    BlockComment { open_offset: usize },
    HereDoc,
    HereString(char),
}

/// An open `{` or `(`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Group {
    opener: char,
    line: usize,
    /// Quote mode and its opening line to return to when the group closes
    resume: Option<(Mode, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HereDoc {
    delimiter: String,
    strip_tabs: bool,
    line: usize,
}

/// Quote/nesting state machine over a piece of shell text.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    profile: &'static DialectProfile,
    text: &'a str,
    pos: usize,
    line: usize,
    mode: Mode,
    /// Line where the current quote, comment block or here-string opened
    open_line: usize,
    escape_pending: bool,
    prev: Option<char>,
    prev_class: Option<CharClass>,
    groups: Vec<Group>,
    heredocs: VecDeque<HereDoc>,
    /// Current physical line of a here-document or here-string body
    body_line: String,
}

impl<'a> Cursor<'a> {
    /// Start scanning `text`, whose first character sits on physical line `first_line`.
    pub fn new(text: &'a str, profile: &'static DialectProfile, first_line: usize) -> Self {
        Self {
            profile,
            text,
            pos: 0,
            line: first_line,
            mode: Mode::Code,
            open_line: first_line,
            escape_pending: false,
            prev: None,
            prev_class: None,
            groups: Vec::new(),
            heredocs: VecDeque::new(),
            body_line: String::new(),
        }
    }

    /// Physical line of the next character.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current brace/paren depth.
    pub fn depth(&self) -> usize {
        self.groups.len()
    }

    /// True when a newline here would end a complete statement: unquoted,
    /// no open group, no pending here-document, no dangling escape.
    pub fn is_balanced(&self) -> bool {
        self.mode == Mode::Code
            && self.groups.is_empty()
            && self.heredocs.is_empty()
            && !self.escape_pending
    }

    /// The outermost construct still open, if any.
    ///
    /// A here-document whose terminator is the final line without a trailing
    /// newline counts as closed.
    pub fn open_construct(&self) -> Option<Truncation> {
        let inner = match self.mode {
            Mode::Single => Some((Construct::SingleQuote, self.open_line)),
            Mode::Double => Some((Construct::DoubleQuote, self.open_line)),
            Mode::AnsiC => Some((Construct::AnsiCQuote, self.open_line)),
            Mode::Backtick => Some((Construct::Backtick, self.open_line)),
            Mode::BlockComment { .. } => Some((Construct::BlockComment, self.open_line)),
            Mode::HereString(_) => Some((Construct::HereString, self.open_line)),
            Mode::HereDoc if self.heredocs.len() == 1 && self.at_heredoc_terminator() => None,
            Mode::HereDoc | Mode::Code | Mode::Comment => self
                .heredocs
                .front()
                .map(|doc| (Construct::HereDoc, doc.line)),
        };
        let group = self.groups.first().map(|group| match group.resume {
            Some((_, line)) => (Construct::DoubleQuote, line),
            None if group.opener == '{' => (Construct::Brace, group.line),
            None => (Construct::Paren, group.line),
        });

        let (construct, line) = match (group, inner) {
            (Some(g), Some(i)) if i.1 < g.1 => i,
            (Some(g), _) => g,
            (None, Some(i)) => i,
            (None, None) => return None,
        };
        Some(Truncation { construct, line })
    }

    fn at_heredoc_terminator(&self) -> bool {
        match self.heredocs.front() {
            Some(doc) => {
                let candidate = if doc.strip_tabs {
                    self.body_line.trim_start_matches('\t')
                } else {
                    self.body_line.as_str()
                };
                candidate == doc.delimiter
            }
            None => false,
        }
    }

    fn step(&mut self, ch: char, offset: usize) -> CharClass {
        if self.escape_pending {
            self.escape_pending = false;
            return CharClass::Escaped;
        }

        match self.mode {
            Mode::Code => self.step_code(ch, offset),
            Mode::Single => {
                if ch == '\'' {
                    self.mode = Mode::Code;
                    CharClass::QuoteDelim
                } else {
                    CharClass::Quoted
                }
            }
            Mode::Double => {
                if ch == self.profile.escape {
                    self.escape_pending = true;
                    CharClass::Escape
                } else if ch == '"' {
                    self.mode = Mode::Code;
                    CharClass::QuoteDelim
                } else if ch == '(' && self.after_quoted_dollar() {
                    self.groups.push(Group {
                        opener: '(',
                        line: self.line,
                        resume: Some((Mode::Double, self.open_line)),
                    });
                    self.mode = Mode::Code;
                    CharClass::Code
                } else {
                    CharClass::Quoted
                }
            }
            Mode::AnsiC => {
                if ch == '\\' {
                    self.escape_pending = true;
                    CharClass::Escape
                } else if ch == '\'' {
                    self.mode = Mode::Code;
                    CharClass::QuoteDelim
                } else {
                    CharClass::Quoted
                }
            }
            Mode::Backtick => {
                if ch == '\\' {
                    self.escape_pending = true;
                    CharClass::Escape
                } else if ch == '`' {
                    self.mode = Mode::Code;
                    CharClass::QuoteDelim
                } else {
                    CharClass::Quoted
                }
            }
            Mode::Comment => {
                if ch == '\n' {
                    self.mode = Mode::Code;
                    self.end_of_code_line();
                    CharClass::Code
                } else {
                    CharClass::Comment
                }
            }
            Mode::BlockComment { open_offset } => {
                if let Some((open, close)) = self.profile.block_comment {
                    let end = offset + ch.len_utf8();
                    let closes = end >= open_offset + open.len() + close.len();
                    if closes && self.text[..end].ends_with(close) {
                        self.mode = Mode::Code;
                    }
                }
                CharClass::Comment
            }
            Mode::HereDoc => {
                if ch == '\n' {
                    if self.at_heredoc_terminator() {
                        self.heredocs.pop_front();
                        if self.heredocs.is_empty() {
                            self.mode = Mode::Code;
                        }
                    }
                    self.body_line.clear();
                } else {
                    self.body_line.push(ch);
                }
                CharClass::HereBody
            }
            Mode::HereString(quote) => {
                if ch == '\n' {
                    self.body_line.clear();
                } else {
                    self.body_line.push(ch);
                    if ch == '@' && self.body_line.len() == 2 && self.body_line.starts_with(quote) {
                        self.mode = Mode::Code;
                    }
                }
                CharClass::HereBody
            }
        }
    }

    fn step_code(&mut self, ch: char, offset: usize) -> CharClass {
        let profile = self.profile;

        if ch == profile.escape {
            self.escape_pending = true;
            return CharClass::Escape;
        }

        if let Some((open, _)) = profile.block_comment {
            if self.text[offset..].starts_with(open) {
                self.mode = Mode::BlockComment {
                    open_offset: offset,
                };
                self.open_line = self.line;
                return CharClass::Comment;
            }
        }

        match ch {
            '\'' | '"' if profile.here_strings && self.prev == Some('@') => {
                self.mode = Mode::HereString(ch);
                self.open_line = self.line;
                self.body_line.clear();
                CharClass::QuoteDelim
            }
            '\'' => {
                self.mode = if profile.ansi_c_quotes && self.prev == Some('$') {
                    Mode::AnsiC
                } else {
                    Mode::Single
                };
                self.open_line = self.line;
                CharClass::QuoteDelim
            }
            '"' => {
                self.mode = Mode::Double;
                self.open_line = self.line;
                CharClass::QuoteDelim
            }
            '`' if profile.backticks => {
                self.mode = Mode::Backtick;
                self.open_line = self.line;
                CharClass::QuoteDelim
            }
            c if c == profile.comment && starts_word(self.prev) => {
                self.mode = Mode::Comment;
                CharClass::Comment
            }
            '{' | '(' => {
                self.groups.push(Group {
                    opener: ch,
                    line: self.line,
                    resume: None,
                });
                CharClass::Code
            }
            '}' | ')' => {
                let opener = if ch == '}' { '{' } else { '(' };
                if self.groups.last().map(|g| g.opener) == Some(opener) {
                    if let Some(Group {
                        resume: Some((mode, line)),
                        ..
                    }) = self.groups.pop()
                    {
                        self.mode = mode;
                        self.open_line = line;
                    }
                }
                CharClass::Code
            }
            '<' if profile.heredocs && self.prev != Some('<') => {
                if let Some(doc) = self.heredoc_at(offset) {
                    self.heredocs.push_back(doc);
                }
                CharClass::Code
            }
            '\n' => {
                self.end_of_code_line();
                CharClass::Code
            }
            _ => CharClass::Code,
        }
    }

    /// A `$` that is part of a double-quoted string, not escaped.
    fn after_quoted_dollar(&self) -> bool {
        self.prev == Some('$') && self.prev_class == Some(CharClass::Quoted)
    }

    /// A newline in code: start collecting pending here-document bodies.
    fn end_of_code_line(&mut self) {
        if !self.heredocs.is_empty() {
            self.mode = Mode::HereDoc;
            self.body_line.clear();
        }
    }

    /// Parse a `<<WORD` / `<<-WORD` redirection starting at `offset`.
    fn heredoc_at(&self, offset: usize) -> Option<HereDoc> {
        let rest = &self.text[offset..];
        if !rest.starts_with("<<") || rest.starts_with("<<<") {
            return None;
        }
        // `$(( a << 2 ))` is a shift, not a here-document
        let n = self.groups.len();
        if n >= 2 && self.groups[n - 1].opener == '(' && self.groups[n - 2].opener == '(' {
            return None;
        }

        let mut rest = &rest[2..];
        let strip_tabs = rest.starts_with('-');
        if strip_tabs {
            rest = &rest[1..];
        }
        let delimiter = heredoc_delimiter(rest.trim_start_matches(|c| c == ' ' || c == '\t'));
        if delimiter.is_empty() {
            return None;
        }

        Some(HereDoc {
            delimiter,
            strip_tabs,
            line: self.line,
        })
    }
}

impl Iterator for Cursor<'_> {
    type Item = Classified;

    fn next(&mut self) -> Option<Classified> {
        let ch = self.text[self.pos..].chars().next()?;
        let offset = self.pos;
        let line = self.line;
        self.pos += ch.len_utf8();

        let class = self.step(ch, offset);
        if ch == '\n' {
            self.line += 1;
        }
        self.prev = Some(ch);
        self.prev_class = Some(class);

        Some(Classified {
            offset,
            ch,
            class,
            line,
            depth: self.groups.len(),
        })
    }
}

/// A comment character only starts a comment at the beginning of a word.
fn starts_word(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, ';' | '&' | '|' | '(' | ')'),
    }
}

/// Read a here-document delimiter word with quote removal (`'EOF'`, `"EOF"`, `\EOF`).
fn heredoc_delimiter(text: &str) -> String {
    let mut delimiter = String::new();
    let mut chars = text.chars();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => delimiter.push(c),
            None => match c {
                '\'' | '"' => quote = Some(c),
                '\\' => {
                    if let Some(next) = chars.next() {
                        delimiter.push(next);
                    }
                }
                c if c.is_whitespace() || matches!(c, ';' | '|' | '&' | '<' | '>' | '(' | ')') => {
                    break
                }
                c => delimiter.push(c),
            },
        }
    }

    delimiter
}
