//! Definition data structures produced by the scanner

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of a shell definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Alias,
    Function,
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionKind::Alias => write!(f, "alias"),
            DefinitionKind::Function => write!(f, "func"),
        }
    }
}

impl std::str::FromStr for DefinitionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "alias" => Ok(DefinitionKind::Alias),
            "f" | "func" | "function" => Ok(DefinitionKind::Function),
            _ => Err(format!("Unknown definition kind: {}", s)),
        }
    }
}

/// A single alias or function definition recovered from a startup file.
///
/// # Field Semantics
/// - `name`: never empty, already validated against the dialect's identifier pattern
/// - `body`: verbatim shell text; for aliases one quoting layer is removed,
///   for functions this is the normalized block between the outer braces
/// - `file`: the file the definition was read from
/// - `line`: 1-based physical line where the defining statement starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    pub body: String,
    pub file: PathBuf,
    pub line: usize,
}

impl Definition {
    pub fn new(kind: DefinitionKind, name: String, body: String) -> Self {
        Self {
            name,
            kind,
            body,
            file: PathBuf::new(),
            line: 0,
        }
    }

    pub fn with_file(mut self, file: &Path) -> Self {
        self.file = file.to_path_buf();
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// A startup file and its text. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self {
            path: path.into(),
            text: normalize_text(&text),
        }
    }

    /// Build a source file from raw bytes. Invalid UTF-8 is replaced rather
    /// than rejected; startup files occasionally carry stray Latin-1 bytes
    /// in comments.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8]) -> Self {
        Self::new(path, String::from_utf8_lossy(bytes).into_owned())
    }

    /// First line of the file if it is a `#!` line.
    pub fn shebang(&self) -> Option<&str> {
        self.text
            .lines()
            .next()
            .filter(|line| line.starts_with("#!"))
    }
}

/// Drop a leading BOM and turn CRLF line endings into LF.
fn normalize_text(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.contains('\r') {
        text.replace("\r\n", "\n")
    } else {
        text.to_string()
    }
}
