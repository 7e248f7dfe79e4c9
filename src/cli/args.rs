//! CLI argument definitions using Clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::model::{DefinitionKind, Dialect};

#[derive(Parser, Debug)]
#[command(name = "lscmd")]
#[command(about = "Shell command visualization tool - list shell aliases and functions")]
#[command(version)]
pub struct Cli {
    /// Startup files to scan (default: the existing rc files of every supported shell)
    pub files: Vec<PathBuf>,

    /// Parse every file as this shell instead of detecting it
    #[arg(short, long)]
    pub shell: Option<ShellArg>,

    /// Only list this kind of definition: alias|func (a/f)
    #[arg(short = 't', long = "type")]
    pub kind: Option<KindArg>,

    /// Only list definitions whose name contains this text
    #[arg(short, long)]
    pub name: Option<String>,

    /// Also list definitions that were overridden by a later one
    #[arg(long)]
    pub shadowed: bool,

    /// Print the inventory as JSON
    #[arg(long)]
    pub json: bool,

    /// Worker threads (default: one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Merge files in path order instead of the order given
    #[arg(long)]
    pub sort: bool,

    /// Do not print warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Use this configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShellArg {
    Bash,
    Zsh,
    #[value(alias = "posix")]
    Sh,
    #[value(alias = "powershell")]
    Pwsh,
}

impl From<ShellArg> for Dialect {
    fn from(arg: ShellArg) -> Self {
        match arg {
            ShellArg::Bash => Dialect::Bash,
            ShellArg::Zsh => Dialect::Zsh,
            ShellArg::Sh => Dialect::Sh,
            ShellArg::Pwsh => Dialect::PowerShell,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "a")]
    Alias,
    #[value(aliases = ["f", "function"])]
    Func,
}

impl From<KindArg> for DefinitionKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Alias => DefinitionKind::Alias,
            KindArg::Func => DefinitionKind::Function,
        }
    }
}
