//! lscmd - Shell command visualization tool

use clap::Parser;
use colored::Colorize;

use lscmd::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(err) = cli::run(&cli) {
        eprintln!("{} {:#}", "✗".red(), err);
        std::process::exit(1);
    }
}
