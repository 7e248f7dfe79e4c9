//! CLI module

pub mod args;
pub mod context;
pub mod list;

pub use args::Cli;
pub use context::{Context, Filter};

use anyhow::Result;
use log::debug;

use crate::scan::scan_paths;

/// Scan the selected files and print the listing.
pub fn run(cli: &Cli) -> Result<()> {
    let ctx = Context::from_cli(cli)?;
    debug!("files: {:?}", ctx.files);

    let report = scan_paths(&ctx.files, &ctx.options)?;
    list::print_diagnostics(&ctx, &report);

    if ctx.json {
        list::print_json(&ctx, &report)
    } else {
        list::print_table(&ctx, &report)
    }
}
