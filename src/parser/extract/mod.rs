//! # Definition Extractor
//!
//! Turns logical lines into [`Definition`]s using the rules of one
//! [`DialectProfile`]. There is a single algorithm for every dialect; all
//! differences live in the profile.
//!
//! ## Module Structure
//!
//! ```text
//! extract/
//! ├── mod.rs       - This file: Extractor, per-statement dispatch, file driver
//! ├── alias.rs     - `alias name=value` and `Set-Alias name value`
//! └── function.rs  - function headers, body matching, body normalization
//! ```
//!
//! ## Per-Statement Dispatch
//!
//! | Order | Statement shape | Result |
//! |-------|-----------------|--------|
//! | 1 | `then` / `else` / `do` prefix, `case` arm pattern | prefix skipped, rest dispatched |
//! | 2 | `{ ... }` brace group | contents extracted recursively |
//! | 3 | alias command | one definition per `name=value` |
//! | 4 | function header + block | one function definition |
//! | 5 | function header, no body yet | `dangling_header` |
//! | - | anything else | ignored |

mod alias;
mod function;

pub use alias::{try_parse_alias, AliasCandidate};
pub use function::{match_body, normalize_body, try_parse_header, Body};

use log::trace;
use std::path::Path;

use super::dialect::patterns::SH_CASE_HEAD_RE;
use super::dialect::DialectProfile;
use super::lines::{LineReader, LogicalLine};
use super::words::{case_pattern_len, line_at, split_statements, split_words};
use crate::error::ScanError;
use crate::model::{Definition, DefinitionKind, SourceFile};

/// Outcome of extracting one logical line
#[derive(Debug, Default)]
pub struct Extraction {
    pub definitions: Vec<Definition>,
    pub diagnostics: Vec<ScanError>,
    /// A trailing function header whose body may start on the next logical line
    pub dangling_header: Option<LogicalLine>,
}

impl Extraction {
    /// Nothing recognized: no definitions and nothing to report
    pub fn is_unrecognized(&self) -> bool {
        self.definitions.is_empty() && self.diagnostics.is_empty() && self.dangling_header.is_none()
    }
}

/// Everything extracted from one file, in source order
#[derive(Debug, Default)]
pub struct FileExtraction {
    pub definitions: Vec<Definition>,
    pub diagnostics: Vec<ScanError>,
}

/// Definition extractor bound to one dialect
#[derive(Debug, Clone, Copy)]
pub struct Extractor {
    profile: &'static DialectProfile,
}

impl Extractor {
    pub fn new(profile: &'static DialectProfile) -> Self {
        Self { profile }
    }

    /// Extract definitions from one logical line of `file`.
    ///
    /// A truncated line yields only a [`ScanError::TruncatedInput`].
    pub fn extract(&self, line: &LogicalLine, file: &Path) -> Extraction {
        let mut out = Extraction::default();

        if let Some(truncation) = line.truncation {
            out.diagnostics.push(ScanError::TruncatedInput {
                path: file.to_path_buf(),
                line: truncation.line,
                construct: truncation.construct,
            });
            return out;
        }

        self.extract_text(&line.text, line.line, file, &mut out);
        out
    }

    fn extract_text(&self, text: &str, first_line: usize, file: &Path, out: &mut Extraction) {
        let statements = split_statements(text, self.profile);
        let count = statements.len();

        for (i, statement) in statements.into_iter().enumerate() {
            let (skipped, body) = self.skip_leading_keywords(statement.text);
            let offset = statement.offset + skipped;
            let line = line_at(text, first_line, offset);
            let is_last = i + 1 == count;

            self.extract_statement(body, line, is_last, file, out);
        }
    }

    fn extract_statement(
        &self,
        statement: &str,
        line: usize,
        is_last: bool,
        file: &Path,
        out: &mut Extraction,
    ) {
        if statement.is_empty() {
            return;
        }

        // `{ alias a=1; f() { ...; }; }` runs in the current shell
        if self.profile.brace_groups && statement.starts_with('{') {
            if let Body::Block {
                inner,
                inner_offset,
            } = match_body(statement, self.profile)
            {
                let inner_line = line_at(statement, line, inner_offset);
                self.extract_text(inner, inner_line, file, out);
                return;
            }
        }

        let words = split_words(statement, self.profile);
        if let Some(candidates) = try_parse_alias(&words, self.profile) {
            for candidate in candidates {
                self.push_alias(candidate, line, file, out);
            }
            return;
        }

        if let Some(header) = try_parse_header(statement, self.profile) {
            match match_body(header.rest, self.profile) {
                Body::Block { inner, .. } => {
                    let body = normalize_body(inner);
                    let kind = DefinitionKind::Function;
                    self.push_definition(kind, header.name, body, line, file, out);
                }
                Body::Missing if is_last => {
                    out.dangling_header = Some(LogicalLine::new(statement, line));
                }
                Body::Missing | Body::NotBlock => {}
            }
        }
    }

    /// Strip `then` / `else` / `do` prefixes, plus `case WORD in` heads and
    /// arm patterns in dialects that have them. Returns the number of bytes
    /// skipped and the remaining statement.
    fn skip_leading_keywords<'a>(&self, statement: &'a str) -> (usize, &'a str) {
        let mut rest = statement;
        while let Some(len) = self.keyword_len(rest).or_else(|| self.case_prefix_len(rest)) {
            rest = rest[len..].trim_start();
        }
        (statement.len() - rest.len(), rest)
    }

    fn keyword_len(&self, text: &str) -> Option<usize> {
        let word_end = text
            .find(|c: char| c.is_whitespace() || c == ';')
            .unwrap_or(text.len());
        let word = &text[..word_end];
        let is_keyword = self
            .profile
            .leading_keywords
            .iter()
            .any(|k| self.profile.keyword_eq(word, k));
        is_keyword.then_some(word_end)
    }

    fn case_prefix_len(&self, text: &str) -> Option<usize> {
        if !self.profile.case_patterns {
            return None;
        }
        SH_CASE_HEAD_RE
            .find(text)
            .map(|m| m.end())
            .or_else(|| case_pattern_len(text, self.profile))
    }

    fn push_alias(
        &self,
        candidate: AliasCandidate,
        line: usize,
        file: &Path,
        out: &mut Extraction,
    ) {
        self.push_definition(
            DefinitionKind::Alias,
            &candidate.name,
            candidate.body,
            line,
            file,
            out,
        );
    }

    fn push_definition(
        &self,
        kind: DefinitionKind,
        name: &str,
        body: String,
        line: usize,
        file: &Path,
        out: &mut Extraction,
    ) {
        let pattern = match kind {
            DefinitionKind::Alias => self.profile.alias_name,
            DefinitionKind::Function => self.profile.function_name,
        };

        if !pattern.is_match(name) {
            out.diagnostics.push(ScanError::MalformedName {
                path: file.to_path_buf(),
                line,
                kind,
                name: name.to_string(),
            });
            return;
        }

        out.definitions.push(
            Definition::new(kind, name.to_string(), body)
                .with_file(file)
                .with_line(line),
        );
    }
}

/// Does this logical line open a body for a dangling function header?
fn opens_body(line: &LogicalLine, profile: &'static DialectProfile) -> bool {
    let text = line.text.trim_start();
    text.starts_with('{') || (profile.subshell_bodies && text.starts_with('('))
}

/// Extract every definition from a whole source file.
///
/// Logical lines are processed in order. A function header left dangling at
/// the end of one logical line is joined with the next line when that line
/// opens a body. Extraction stops at the first truncated line.
pub fn extract_source(source: &SourceFile, profile: &'static DialectProfile) -> FileExtraction {
    let extractor = Extractor::new(profile);
    let mut result = FileExtraction::default();
    let mut pending: Option<LogicalLine> = None;

    for line in LineReader::new(&source.text, profile) {
        let line = match pending.take() {
            Some(header) if !line.is_truncated() && opens_body(&line, profile) => LogicalLine {
                text: format!("{} {}", header.text, line.text),
                line: header.line,
                end_line: line.end_line,
                truncation: None,
            },
            _ => line,
        };

        trace!("{}:{}: {:?}", source.path.display(), line.line, line.text);
        let truncated = line.is_truncated();
        let extraction = extractor.extract(&line, &source.path);

        result.definitions.extend(extraction.definitions);
        result.diagnostics.extend(extraction.diagnostics);
        pending = extraction.dangling_header;

        if truncated {
            break;
        }
    }

    result
}
