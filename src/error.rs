//! Scanner error taxonomy
//!
//! Every variant except [`ScanError::NoInputAvailable`] is a per-file or
//! per-candidate diagnostic: it is collected into the scan report and the
//! scan carries on with the next candidate or file.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::DefinitionKind;
use crate::parser::Construct;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{}: cannot read file: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: unsupported shell dialect, file skipped", path.display())]
    UnsupportedDialect { path: PathBuf },

    #[error("{}:{line}: unterminated {construct}, rest of file ignored", path.display())]
    TruncatedInput {
        path: PathBuf,
        line: usize,
        construct: Construct,
    },

    #[error("{}:{line}: malformed {kind} name `{name}`, definition skipped", path.display())]
    MalformedName {
        path: PathBuf,
        line: usize,
        kind: DefinitionKind,
        name: String,
    },

    #[error("no input files could be read")]
    NoInputAvailable,
}
