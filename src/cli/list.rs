//! Inventory listing: colored table or JSON

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::context::Context;
use crate::inventory::Record;
use crate::model::DefinitionKind;
use crate::scan::ScanReport;
use crate::utils::strings::{one_line, truncate};

/// Get terminal width, defaulting to 80 if unable to detect
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Calculate column widths (type, name, location, body) for a terminal width
fn calculate_column_widths(term_width: usize, max_body: usize) -> (usize, usize, usize, usize) {
    // "│ " prefix (2) + " │" suffix (2) + spaces between columns (3)
    let fixed_overhead = 7;
    let type_width = 5;

    let available = term_width.saturating_sub(fixed_overhead + type_width);

    let name_width = (available * 20 / 100).clamp(8, 24);
    let location_width = (available * 30 / 100).clamp(12, 40);
    let mut body_width = available
        .saturating_sub(name_width + location_width)
        .max(10);
    if max_body > 0 {
        body_width = body_width.min(max_body);
    }

    (type_width, name_width, location_width, body_width)
}

/// Show paths under the home directory as `~/...`
fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}

fn location(file: &Path, line: usize) -> String {
    format!("{}:{}", display_path(file), line)
}

/// Records that pass the filter, with shadow history only when requested
fn visible_records<'a>(ctx: &Context, report: &'a ScanReport) -> Vec<Record<'a>> {
    report
        .inventory
        .records()
        .into_iter()
        .filter(|r| ctx.filter.matches(r.kind, r.name))
        .map(|r| Record {
            shadows: if ctx.show_shadowed { r.shadows } else { &[] },
            ..r
        })
        .collect()
}

/// Print scan diagnostics as warnings
pub fn print_diagnostics(ctx: &Context, report: &ScanReport) {
    for diagnostic in &report.diagnostics {
        ctx.print_warning(&diagnostic.to_string());
    }
    if report.cancelled {
        ctx.print_warning("scan cancelled, listing is incomplete");
    }
}

/// Print the inventory as pretty JSON
pub fn print_json(ctx: &Context, report: &ScanReport) -> Result<()> {
    let records = visible_records(ctx, report);
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Print the inventory as a table
pub fn print_table(ctx: &Context, report: &ScanReport) -> Result<()> {
    let records = visible_records(ctx, report);

    if records.is_empty() {
        println!("{}", "No definitions found".dimmed());
        return Ok(());
    }

    let term_width = get_terminal_width();
    let (type_w, name_w, loc_w, body_w) =
        calculate_column_widths(term_width, ctx.config.ui.max_body_width);

    let title = format!(
        "{} definitions from {} files",
        records.len(),
        report.files_read
    );
    let header_line_len = term_width.saturating_sub(title.len() + 4);
    println!("┌─ {} {}", title.bold(), "─".repeat(header_line_len).dimmed());

    let content_width = type_w + 1 + name_w + 1 + loc_w + 1 + body_w;
    println!(
        "│ {:<type_w$} {:<name_w$} {:<loc_w$} {:<body_w$} │",
        "TYPE".bold().cyan(),
        "NAME".bold().cyan(),
        "LOCATION".bold().cyan(),
        "BODY".bold().cyan(),
    );
    println!("│ {} │", "─".repeat(content_width).dimmed());

    for record in &records {
        println!(
            "│ {:<type_w$} {:<name_w$} {:<loc_w$} {:<body_w$} │",
            color_kind(record.kind),
            truncate(record.name, name_w).white(),
            truncate(&location(record.file, record.line), loc_w).dimmed(),
            truncate(&one_line(record.body), body_w),
        );

        // Most recent override first
        for old in record.shadows.iter().rev() {
            println!(
                "│ {:<type_w$} {:<name_w$} {:<loc_w$} {:<body_w$} │",
                old.kind.to_string().dimmed(),
                truncate("↳ shadowed", name_w).yellow(),
                truncate(&location(&old.file, old.line), loc_w).dimmed(),
                truncate(&one_line(&old.body), body_w).dimmed(),
            );
        }
    }

    println!("└{}┘", "─".repeat(content_width + 2).dimmed());

    let shadowed = report.inventory.shadow_history().count();
    if shadowed > 0 && !ctx.show_shadowed {
        let hint = format!(
            "{} names defined more than once; use --shadowed to see overrides",
            shadowed
        );
        println!("{}", hint.dimmed());
    }

    Ok(())
}

/// Color definition kind
fn color_kind(kind: DefinitionKind) -> colored::ColoredString {
    let kind_str = format!("{}", kind);
    match kind {
        DefinitionKind::Alias => kind_str.green().bold(),
        DefinitionKind::Function => kind_str.blue().bold(),
    }
}
