//! Command execution context

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::cli::args::Cli;
use crate::model::{Config, DefinitionKind};
use crate::scan::{FileOrder, ScanOptions};
use crate::utils::path::default_files;

/// Which definitions to show
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub kind: Option<DefinitionKind>,
    pub name: Option<String>,
}

impl Filter {
    pub fn matches(&self, kind: DefinitionKind, name: &str) -> bool {
        self.kind.map_or(true, |k| k == kind)
            && self.name.as_deref().map_or(true, |n| name.contains(n))
    }
}

/// Everything a run needs, with CLI flags applied over the config file
pub struct Context {
    pub config: Config,
    pub files: Vec<PathBuf>,
    pub options: ScanOptions,
    pub filter: Filter,
    pub show_shadowed: bool,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = crate::config::load_config(cli.config.as_deref())?;

        if !config.ui.color {
            colored::control::set_override(false);
        }

        let files = if cli.files.is_empty() {
            default_files(&config)
        } else {
            cli.files.clone()
        };

        let order = if cli.sort || config.scan.sort {
            FileOrder::Lexicographic
        } else {
            FileOrder::AsGiven
        };

        let options = ScanOptions {
            dialect: cli.shell.map(Into::into).or(config.scan.dialect),
            jobs: cli.jobs.unwrap_or_else(|| config.jobs()),
            order,
            cancel: None,
        };

        Ok(Self {
            files,
            options,
            filter: Filter {
                kind: cli.kind.map(Into::into),
                name: cli.name.clone(),
            },
            show_shadowed: cli.shadowed || config.ui.show_shadowed,
            json: cli.json,
            quiet: cli.quiet,
            config,
        })
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "⚠".yellow(), message);
        }
    }
}
