//! # Dialect Regex Patterns
//!
//! Identifier patterns and function-header patterns used by the dialect
//! profiles.
//!
//! ## Pattern Naming Convention
//!
//! - `*_NAME_RE` - Full-match identifier validation (anchored both ends)
//! - `*_HEADER_RE` - Anchored at statement start, matches a definition header
//!
//! Header patterns capture a loose name candidate (group 1); the candidate is
//! validated against the matching `*_NAME_RE` afterwards so that a bad name
//! is reported instead of silently ignored.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // =========================================================================
    // Identifier Patterns
    // =========================================================================

    /// Alias names in the sh family: anything but blanks, `=`, `/`, quoting
    /// characters, expansions and shell metacharacters.
    ///
    /// Accepts names like `ll`, `..`, `~`, `g-st`, `please!`.
    pub static ref SH_ALIAS_NAME_RE: Regex = Regex::new(
        r#"^[^\s=/$`'"\\;|&<>(){}\[\]#]+$"#
    ).unwrap();

    /// Function names in bash and zsh, which are far more lenient than POSIX.
    pub static ref BASH_FUNCTION_NAME_RE: Regex = Regex::new(
        r#"^[^\s=$`'"\\;|&<>(){}\[\]#]+$"#
    ).unwrap();

    /// POSIX function names: a portable name (letters, digits, underscore).
    pub static ref POSIX_FUNCTION_NAME_RE: Regex = Regex::new(
        r#"^[A-Za-z_][A-Za-z0-9_]*$"#
    ).unwrap();

    /// PowerShell alias names.
    pub static ref PWSH_ALIAS_NAME_RE: Regex = Regex::new(
        r#"^[^\s'"`$;|&<>(){}\[\]@#,=]+$"#
    ).unwrap();

    /// PowerShell function names (`Verb-Noun`, plain words, dotted names).
    pub static ref PWSH_FUNCTION_NAME_RE: Regex = Regex::new(
        r#"^\w[\w.-]*$"#
    ).unwrap();

    // =========================================================================
    // Function Header Patterns
    // =========================================================================

    /// `function name`, `function name()`, followed by optional blanks.
    ///
    /// Captures:
    /// - Group 1: name candidate
    pub static ref SH_KEYWORD_HEADER_RE: Regex = Regex::new(
        r#"^function\s+([^\s(){};|&<>]+)\s*(?:\(\s*\))?\s*"#
    ).unwrap();

    /// Bare `name()` / `name ()` header.
    ///
    /// Captures:
    /// - Group 1: name candidate
    pub static ref SH_BARE_HEADER_RE: Regex = Regex::new(
        r#"^([^\s(){};|&<>=]+)\s*\(\s*\)\s*"#
    ).unwrap();

    /// `case WORD in` at the start of a statement whose first arm follows on
    /// the same line.
    pub static ref SH_CASE_HEAD_RE: Regex = Regex::new(
        r#"^case\s+(?:"[^"]*"|'[^']*'|\S+)\s+in(?:\s+|$)"#
    ).unwrap();

    /// `function Name`, `filter Name`, with an optional parameter list.
    ///
    /// Captures:
    /// - Group 1: name candidate (may carry a `global:`-style scope prefix)
    pub static ref PWSH_KEYWORD_HEADER_RE: Regex = Regex::new(
        r#"(?i)^(?:function|filter)\s+([^\s(){};|&<>]+)\s*(?:\([^)]*\))?\s*"#
    ).unwrap();
}
