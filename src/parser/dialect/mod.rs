//! # Dialect Profiles and Detection
//!
//! Each supported dialect is described by one static [`DialectProfile`]: a
//! plain record of syntax rules (comment and escape characters, quoting
//! features, alias and function forms, identifier patterns). The tokenizer and
//! the extractor are single algorithms parameterized by that record, so adding
//! a dialect means adding a profile here, not new parsing code.
//!
//! ## Detection Order
//!
//! | Step | Source | Example |
//! |------|--------|---------|
//! | 1 | Caller override | `--shell zsh` |
//! | 2 | Shebang line | `#!/usr/bin/env bash` |
//! | 3 | Filename | `.zshrc`, `profile.ps1` |
//!
//! The first step that yields a dialect wins. When none does the file is
//! reported as [`ScanError::UnsupportedDialect`] and skipped.

pub mod patterns;

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::error::ScanError;
use crate::model::{Dialect, SourceFile};
use patterns::*;

/// How a dialect spells an alias definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasSyntax {
    /// `alias [-opts] name=value [name=value ...]`
    Builtin { keyword: &'static str },
    /// `Set-Alias [-Name] name [-Value] value [-Scope s] [-Force]`
    Cmdlet {
        commands: &'static [&'static str],
        name_param: &'static str,
        value_param: &'static str,
        /// Parameters that take one argument and are ignored; any other
        /// parameter is taken to be a switch
        valued: &'static [&'static str],
    },
}

/// Syntax rules for one shell dialect. Immutable and shared.
#[derive(Debug)]
pub struct DialectProfile {
    pub dialect: Dialect,
    pub comment: char,
    /// Escape character outside single quotes; also the line-continuation marker
    pub escape: char,
    pub block_comment: Option<(&'static str, &'static str)>,
    /// `$'...'` quoting, where backslash escapes are active
    pub ansi_c_quotes: bool,
    /// `` `...` `` command substitution
    pub backticks: bool,
    /// `<<WORD` here-documents
    pub heredocs: bool,
    /// `@"..."@` / `@'...'@` here-strings
    pub here_strings: bool,
    /// A doubled quote inside a quoted string is a literal quote (`'it''s'`)
    pub doubled_quote_escapes: bool,
    /// `{ ...; }` at statement level runs its contents in the current shell
    pub brace_groups: bool,
    /// Keywords and alias commands match regardless of case
    pub case_insensitive: bool,
    pub alias: AliasSyntax,
    pub alias_name: &'static Regex,
    pub function_name: &'static Regex,
    /// Header for keyword-introduced functions (`function name`), if the dialect has them
    pub keyword_header: Option<&'static Regex>,
    /// Header for bare `name()` functions, if the dialect has them
    pub bare_header: Option<&'static Regex>,
    /// Whether `name() ( ... )` subshell bodies are accepted next to `{ ... }`
    pub subshell_bodies: bool,
    /// Reserved words that may precede a simple command on the same statement
    pub leading_keywords: &'static [&'static str],
    /// `case` arms: a `pattern)` prefix may precede a simple command
    pub case_patterns: bool,
    /// Scope qualifiers stripped from function names (`global:Name`)
    pub scope_prefixes: &'static [&'static str],
}

const SH_LEADING_KEYWORDS: &[&str] = &["then", "else", "do"];

lazy_static! {
    pub static ref BASH: DialectProfile = DialectProfile {
        dialect: Dialect::Bash,
        comment: '#',
        escape: '\\',
        block_comment: None,
        ansi_c_quotes: true,
        backticks: true,
        heredocs: true,
        here_strings: false,
        doubled_quote_escapes: false,
        brace_groups: true,
        case_insensitive: false,
        alias: AliasSyntax::Builtin { keyword: "alias" },
        alias_name: &*SH_ALIAS_NAME_RE,
        function_name: &*BASH_FUNCTION_NAME_RE,
        keyword_header: Some(&*SH_KEYWORD_HEADER_RE),
        bare_header: Some(&*SH_BARE_HEADER_RE),
        subshell_bodies: true,
        leading_keywords: SH_LEADING_KEYWORDS,
        case_patterns: true,
        scope_prefixes: &[],
    };

    pub static ref ZSH: DialectProfile = DialectProfile {
        dialect: Dialect::Zsh,
        ..clone_profile(&*BASH)
    };

    pub static ref SH: DialectProfile = DialectProfile {
        dialect: Dialect::Sh,
        ansi_c_quotes: false,
        function_name: &*POSIX_FUNCTION_NAME_RE,
        keyword_header: None,
        ..clone_profile(&*BASH)
    };

    pub static ref PWSH: DialectProfile = DialectProfile {
        dialect: Dialect::PowerShell,
        comment: '#',
        escape: '`',
        block_comment: Some(("<#", "#>")),
        ansi_c_quotes: false,
        backticks: false,
        heredocs: false,
        here_strings: true,
        doubled_quote_escapes: true,
        brace_groups: false,
        case_insensitive: true,
        alias: AliasSyntax::Cmdlet {
            commands: &["Set-Alias", "New-Alias", "sal", "nal"],
            name_param: "-Name",
            value_param: "-Value",
            valued: &["-Scope", "-Option", "-Description"],
        },
        alias_name: &*PWSH_ALIAS_NAME_RE,
        function_name: &*PWSH_FUNCTION_NAME_RE,
        keyword_header: Some(&*PWSH_KEYWORD_HEADER_RE),
        bare_header: None,
        subshell_bodies: false,
        leading_keywords: &[],
        case_patterns: false,
        scope_prefixes: &["global:", "script:", "local:", "private:"],
    };
}

/// Field-wise copy used to derive one static profile from another.
fn clone_profile(base: &'static DialectProfile) -> DialectProfile {
    DialectProfile {
        dialect: base.dialect,
        comment: base.comment,
        escape: base.escape,
        block_comment: base.block_comment,
        ansi_c_quotes: base.ansi_c_quotes,
        backticks: base.backticks,
        heredocs: base.heredocs,
        here_strings: base.here_strings,
        doubled_quote_escapes: base.doubled_quote_escapes,
        brace_groups: base.brace_groups,
        case_insensitive: base.case_insensitive,
        alias: base.alias,
        alias_name: base.alias_name,
        function_name: base.function_name,
        keyword_header: base.keyword_header,
        bare_header: base.bare_header,
        subshell_bodies: base.subshell_bodies,
        leading_keywords: base.leading_keywords,
        case_patterns: base.case_patterns,
        scope_prefixes: base.scope_prefixes,
    }
}

impl DialectProfile {
    /// Compare a word against a keyword using the dialect's case rules.
    pub fn keyword_eq(&self, word: &str, keyword: &str) -> bool {
        if self.case_insensitive {
            word.eq_ignore_ascii_case(keyword)
        } else {
            word == keyword
        }
    }

    /// Strip a scope qualifier such as `global:` from a function name.
    pub fn strip_scope<'a>(&self, name: &'a str) -> &'a str {
        for prefix in self.scope_prefixes {
            match name.get(..prefix.len()) {
                Some(head) if head.eq_ignore_ascii_case(prefix) && name.len() > prefix.len() => {
                    return &name[prefix.len()..];
                }
                _ => {}
            }
        }
        name
    }
}

/// The static profile for a dialect.
pub fn profile(dialect: Dialect) -> &'static DialectProfile {
    match dialect {
        Dialect::Bash => &*BASH,
        Dialect::Zsh => &*ZSH,
        Dialect::Sh => &*SH,
        Dialect::PowerShell => &*PWSH,
    }
}

/// Select the profile for a source file.
///
/// # Arguments
///
/// - `source`: The file being scanned
/// - `override_dialect`: Caller-supplied dialect, bypassing detection
///
/// # Returns
///
/// The matching profile, or [`ScanError::UnsupportedDialect`] when neither
/// the shebang nor the filename identify a supported dialect.
pub fn detect(
    source: &SourceFile,
    override_dialect: Option<Dialect>,
) -> Result<&'static DialectProfile, ScanError> {
    let dialect = override_dialect
        .or_else(|| source.shebang().and_then(detect_from_shebang))
        .or_else(|| detect_from_file(&source.path));

    match dialect {
        Some(dialect) => Ok(profile(dialect)),
        None => Err(ScanError::UnsupportedDialect {
            path: source.path.clone(),
        }),
    }
}

/// Detect dialect from a `#!` line.
///
/// Handles direct interpreters (`#!/bin/bash`) and `env` indirection,
/// including `env -S` and leading `VAR=value` assignments.
pub fn detect_from_shebang(line: &str) -> Option<Dialect> {
    let rest = line.strip_prefix("#!")?;
    let mut words = rest.split_whitespace();
    let mut program = basename(words.next()?);

    if program == "env" {
        program = words
            .find(|w| !w.starts_with('-') && !w.contains('='))
            .map(basename)?;
    }

    Dialect::from_interpreter(program)
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Detect dialect from well-known startup file names, then extensions.
pub fn detect_from_file(path: &Path) -> Option<Dialect> {
    let filename = path.file_name().and_then(|n| n.to_str())?;
    let stem = filename.strip_prefix('.').unwrap_or(filename);

    match stem {
        "bashrc" | "bash_profile" | "bash_login" | "bash_logout" | "bash_aliases" => {
            return Some(Dialect::Bash)
        }
        "zshrc" | "zshenv" | "zprofile" | "zlogin" | "zlogout" => return Some(Dialect::Zsh),
        "profile" | "shrc" | "kshrc" | "mkshrc" => return Some(Dialect::Sh),
        _ => {}
    }
    // System-wide variants such as /etc/bash.bashrc or /etc/zsh/zshrc
    if stem.ends_with(".bashrc") {
        return Some(Dialect::Bash);
    }

    let extension = path.extension().and_then(|e| e.to_str())?;
    match extension.to_lowercase().as_str() {
        "bash" => Some(Dialect::Bash),
        "zsh" => Some(Dialect::Zsh),
        "sh" | "ksh" => Some(Dialect::Sh),
        "ps1" | "psm1" => Some(Dialect::PowerShell),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_profiles_are_distinct() {
        for dialect in Dialect::ALL {
            assert_eq!(profile(dialect).dialect, dialect);
        }
        assert!(SH.keyword_header.is_none());
        assert!(ZSH.keyword_header.is_some());
        assert_eq!(PWSH.escape, '`');
    }

    #[test]
    fn test_detect_from_shebang() {
        assert_eq!(detect_from_shebang("#!/bin/bash"), Some(Dialect::Bash));
        assert_eq!(detect_from_shebang("#!/usr/bin/env zsh"), Some(Dialect::Zsh));
        assert_eq!(
            detect_from_shebang("#!/usr/bin/env -S pwsh -NoProfile"),
            Some(Dialect::PowerShell)
        );
        assert_eq!(
            detect_from_shebang("#!/usr/bin/env LANG=C dash"),
            Some(Dialect::Sh)
        );
        assert_eq!(detect_from_shebang("#!/usr/bin/python3"), None);
        assert_eq!(detect_from_shebang("# not a shebang"), None);
    }

    #[test]
    fn test_detect_from_file() {
        let cases = [
            ("/home/u/.bashrc", Some(Dialect::Bash)),
            ("/etc/bash.bashrc", Some(Dialect::Bash)),
            ("/home/u/.zprofile", Some(Dialect::Zsh)),
            ("/home/u/.profile", Some(Dialect::Sh)),
            ("/home/u/aliases.zsh", Some(Dialect::Zsh)),
            ("/home/u/Microsoft.PowerShell_profile.ps1", Some(Dialect::PowerShell)),
            ("/home/u/notes.txt", None),
            ("/home/u/.vimrc", None),
        ];
        for (path, expected) in cases {
            assert_eq!(detect_from_file(&PathBuf::from(path)), expected, "{}", path);
        }
    }

    #[test]
    fn test_detect_order() {
        // Override beats shebang, shebang beats filename
        let src = SourceFile::new("/home/u/.bashrc", "#!/bin/zsh\n");
        assert_eq!(detect(&src, Some(Dialect::Sh)).unwrap().dialect, Dialect::Sh);
        assert_eq!(detect(&src, None).unwrap().dialect, Dialect::Zsh);

        // Unknown interpreter falls through to the filename
        let src = SourceFile::new("/home/u/.bashrc", "#!/usr/bin/perl\n");
        assert_eq!(detect(&src, None).unwrap().dialect, Dialect::Bash);
    }

    #[test]
    fn test_detect_unsupported() {
        let src = SourceFile::new("/home/u/script.py", "#!/usr/bin/python3\nprint(1)\n");
        let err = detect(&src, None).unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedDialect { .. }));
    }

    #[test]
    fn test_strip_scope() {
        assert_eq!(PWSH.strip_scope("global:Get-Foo"), "Get-Foo");
        assert_eq!(PWSH.strip_scope("Global:Get-Foo"), "Get-Foo");
        assert_eq!(PWSH.strip_scope("Get-Foo"), "Get-Foo");
        assert_eq!(BASH.strip_scope("global:x"), "global:x");
    }

    #[test]
    fn test_keyword_eq() {
        assert!(PWSH.keyword_eq("set-alias", "Set-Alias"));
        assert!(!BASH.keyword_eq("ALIAS", "alias"));
    }
}
