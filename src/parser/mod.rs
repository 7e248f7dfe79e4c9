//! # Parser Module
//!
//! Recovers alias and function definitions from shell text without executing
//! it and without a full shell grammar.
//!
//! ## Architecture Overview
//!
//! ```text
//! parser/
//! ├── mod.rs          - This file: re-exports + parse_source entry point
//! ├── cursor.rs       - Nesting cursor: quote/comment/heredoc/brace FSM
//! ├── lines.rs        - LineReader: text -> LogicalLine iterator
//! ├── words.rs        - Statement/word splitting, quote stripping
//! ├── dialect/        - Static DialectProfile per dialect + detection
//! │   ├── mod.rs
//! │   └── patterns.rs - Identifier and header regexes
//! └── extract/        - Definition extractor
//!     ├── mod.rs      - Extractor + whole-file driver
//!     ├── alias.rs
//!     └── function.rs
//! ```
//!
//! ## Data Flow
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | [`detect`] | `SourceFile` (+ override) | `&'static DialectProfile` |
//! | [`LineReader`] | text + profile | `LogicalLine`s |
//! | [`Extractor`] | `LogicalLine` | `Definition`s + diagnostics |
//! | [`extract_source`] | `SourceFile` + profile | all definitions of a file |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lscmd::model::SourceFile;
//! use lscmd::parser::parse_source;
//!
//! let source = SourceFile::new("/home/me/.bashrc", "alias ll='ls -la'\n");
//! let result = parse_source(&source, None)?;
//! assert_eq!(result.definitions[0].name, "ll");
//! ```
//!
//! ## How to Modify
//!
//! ### Adding a new dialect
//!
//! 1. Add the variant to `model::Dialect` (name, parsing, startup files)
//! 2. Add a static profile in `dialect/mod.rs`, with patterns in `patterns.rs`
//! 3. Extend `detect_from_shebang` / `detect_from_file` if needed
//!
//! No changes to the cursor or the extractor should be required unless the
//! dialect introduces a new kind of quoting.

mod cursor;
pub mod dialect;
mod extract;
mod lines;
mod words;

pub use cursor::{CharClass, Classified, Construct, Cursor, Truncation};
pub use dialect::{detect, profile, AliasSyntax, DialectProfile};
pub use extract::{extract_source, Extraction, Extractor, FileExtraction};
pub use lines::{LineReader, LogicalLine};
pub use words::{find_assignment, split_statements, split_words, strip_outer_quotes, Statement};

use log::debug;

use crate::error::ScanError;
use crate::model::{Dialect, SourceFile};

/// Detect the dialect of `source` and extract all of its definitions.
///
/// # Arguments
///
/// - `source`: The file to parse
/// - `override_dialect`: Dialect to use instead of detection
///
/// # Returns
///
/// The file's definitions and per-candidate diagnostics, or
/// [`ScanError::UnsupportedDialect`] when no dialect applies.
pub fn parse_source(
    source: &SourceFile,
    override_dialect: Option<Dialect>,
) -> Result<FileExtraction, ScanError> {
    let profile = detect(source, override_dialect)?;
    debug!("{}: dialect {}", source.path.display(), profile.dialect);

    let result = extract_source(source, profile);
    debug!(
        "{}: {} definitions, {} diagnostics",
        source.path.display(),
        result.definitions.len(),
        result.diagnostics.len()
    );
    Ok(result)
}
