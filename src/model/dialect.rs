//! Shell dialects and their conventional startup files

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Supported shell dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Bash,
    Zsh,
    /// POSIX sh and its close relatives (dash, ksh, ash)
    Sh,
    PowerShell,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::Bash,
        Dialect::Zsh,
        Dialect::Sh,
        Dialect::PowerShell,
    ];

    /// Get dialect name as string
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Bash => "bash",
            Dialect::Zsh => "zsh",
            Dialect::Sh => "sh",
            Dialect::PowerShell => "pwsh",
        }
    }

    /// Map an interpreter basename (as found on a shebang line) to a dialect.
    pub fn from_interpreter(program: &str) -> Option<Self> {
        match program {
            "bash" => Some(Dialect::Bash),
            "zsh" => Some(Dialect::Zsh),
            "sh" | "dash" | "ksh" | "mksh" | "ash" | "busybox" => Some(Dialect::Sh),
            "pwsh" | "powershell" | "pwsh-preview" => Some(Dialect::PowerShell),
            _ => None,
        }
    }

    /// Startup files this dialect reads, relative to the home directory.
    ///
    /// Listed in the order the shell itself sources them, so later files
    /// shadow earlier ones the same way they would in a login session.
    pub fn startup_files(&self, home: &Path) -> Vec<PathBuf> {
        match self {
            Dialect::Sh => vec![home.join(".profile")],
            Dialect::Bash => [".bash_profile", ".bash_login", ".bashrc", ".bash_aliases"]
                .iter()
                .map(|f| home.join(f))
                .collect(),
            Dialect::Zsh => {
                let zdotdir = std::env::var_os("ZDOTDIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| home.to_path_buf());
                [".zshenv", ".zprofile", ".zshrc", ".zlogin"]
                    .iter()
                    .map(|f| zdotdir.join(f))
                    .collect()
            }
            Dialect::PowerShell => {
                #[cfg(windows)]
                {
                    vec![dirs::document_dir()
                        .unwrap_or_else(|| home.to_path_buf())
                        .join("PowerShell")
                        .join("Microsoft.PowerShell_profile.ps1")]
                }
                #[cfg(not(windows))]
                {
                    vec![dirs::config_dir()
                        .unwrap_or_else(|| home.join(".config"))
                        .join("powershell")
                        .join("Microsoft.PowerShell_profile.ps1")]
                }
            }
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(Dialect::Bash),
            "zsh" => Ok(Dialect::Zsh),
            "sh" | "posix" | "dash" | "ksh" => Ok(Dialect::Sh),
            "pwsh" | "powershell" => Ok(Dialect::PowerShell),
            _ => Err(format!("Unknown shell dialect: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_name() {
        assert_eq!(Dialect::Bash.name(), "bash");
        assert_eq!(Dialect::PowerShell.name(), "pwsh");
        assert_eq!(format!("{}", Dialect::Sh), "sh");
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("bash".parse::<Dialect>().unwrap(), Dialect::Bash);
        assert_eq!("ZSH".parse::<Dialect>().unwrap(), Dialect::Zsh);
        assert_eq!("posix".parse::<Dialect>().unwrap(), Dialect::Sh);
        assert_eq!(
            "powershell".parse::<Dialect>().unwrap(),
            Dialect::PowerShell
        );
        assert!("fish".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_from_interpreter() {
        assert_eq!(Dialect::from_interpreter("dash"), Some(Dialect::Sh));
        assert_eq!(Dialect::from_interpreter("pwsh"), Some(Dialect::PowerShell));
        assert_eq!(Dialect::from_interpreter("python3"), None);
    }

    #[test]
    fn test_bash_startup_files_order() {
        let files = Dialect::Bash.startup_files(Path::new("/home/u"));
        assert_eq!(files.first(), Some(&PathBuf::from("/home/u/.bash_profile")));
        assert!(files.contains(&PathBuf::from("/home/u/.bashrc")));
    }
}
