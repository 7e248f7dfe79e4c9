//! # Alias Definitions
//!
//! Two spellings are supported, selected by [`AliasSyntax`]:
//!
//! - **Builtin** (`bash`, `zsh`, `sh`): `alias [-opts] name=value ...`. Every
//!   word with an unquoted `=` defines one alias. Option words and query
//!   words without `=` are skipped.
//! - **Cmdlet** (`pwsh`): `Set-Alias [-Name] name [-Value] value`, with the
//!   `New-Alias` / `sal` / `nal` spellings, `-Name:value` binding, unique
//!   parameter prefixes (`-Val`). Known valued parameters (`-Scope`) are
//!   skipped with their argument; any other parameter (`-Force`) is skipped
//!   alone.

use super::super::dialect::{AliasSyntax, DialectProfile};
use super::super::words::{find_assignment, strip_outer_quotes};

/// One `name`/`value` pair read from an alias command, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCandidate {
    pub name: String,
    pub body: String,
}

/// Read alias candidates from the words of one statement.
///
/// # Returns
///
/// `None` when the statement is not an alias command at all; otherwise the
/// (possibly empty) list of candidates in source order.
pub fn try_parse_alias(
    words: &[&str],
    profile: &'static DialectProfile,
) -> Option<Vec<AliasCandidate>> {
    let (command, args) = words.split_first()?;

    match profile.alias {
        AliasSyntax::Builtin { keyword } => {
            if !profile.keyword_eq(command, keyword) {
                return None;
            }
            Some(parse_builtin(args, profile))
        }
        AliasSyntax::Cmdlet { commands, .. } => {
            if !commands.iter().any(|c| profile.keyword_eq(command, c)) {
                return None;
            }
            Some(parse_cmdlet(args, profile).into_iter().collect())
        }
    }
}

fn parse_builtin(args: &[&str], profile: &'static DialectProfile) -> Vec<AliasCandidate> {
    let mut candidates = Vec::new();

    for word in args {
        let (name, value) = match find_assignment(word, profile) {
            Some(eq) => (&word[..eq], &word[eq + 1..]),
            None => {
                // `alias 'name=value'` quotes the whole assignment
                let inner = strip_outer_quotes(word, profile);
                match inner.find('=') {
                    Some(eq) if inner.len() != word.len() => {
                        candidates.push(AliasCandidate {
                            name: inner[..eq].to_string(),
                            body: inner[eq + 1..].to_string(),
                        });
                    }
                    // options (`-g`, `--`) and queries (`alias ll`)
                    _ => {}
                }
                continue;
            }
        };

        candidates.push(AliasCandidate {
            name: strip_outer_quotes(name, profile).to_string(),
            body: strip_outer_quotes(value, profile).to_string(),
        });
    }

    candidates
}

/// Which cmdlet parameter a `-Param` word refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Name,
    Value,
    Switch,
    Valued,
}

fn parse_cmdlet(args: &[&str], profile: &'static DialectProfile) -> Option<AliasCandidate> {
    let AliasSyntax::Cmdlet {
        name_param,
        value_param,
        valued,
        ..
    } = profile.alias
    else {
        return None;
    };

    let classify = |word: &str| -> Param {
        if param_matches(word, name_param) {
            Param::Name
        } else if param_matches(word, value_param) {
            Param::Value
        } else if valued.iter().any(|p| param_matches(word, p)) {
            Param::Valued
        } else {
            Param::Switch
        }
    };

    let mut name: Option<&str> = None;
    let mut value: Option<&str> = None;
    let mut iter = args.iter();

    while let Some(&word) = iter.next() {
        if word.starts_with('-') && word.len() > 1 {
            let (param, inline) = match word.split_once(':') {
                Some((param, inline)) => (param, Some(inline)),
                None => (word, None),
            };
            let slot = match classify(param) {
                Param::Name => &mut name,
                Param::Value => &mut value,
                Param::Valued => {
                    if inline.is_none() {
                        iter.next();
                    }
                    continue;
                }
                Param::Switch => continue,
            };
            *slot = inline.or_else(|| iter.next().copied());
        } else if name.is_none() {
            name = Some(word);
        } else if value.is_none() {
            value = Some(word);
        }
    }

    Some(AliasCandidate {
        name: strip_outer_quotes(name?, profile).to_string(),
        body: strip_outer_quotes(value?, profile).to_string(),
    })
}

/// PowerShell accepts any unambiguous prefix of a parameter name.
fn param_matches(word: &str, param: &str) -> bool {
    word.len() >= 2
        && word.len() <= param.len()
        && param
            .get(..word.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(word))
}
