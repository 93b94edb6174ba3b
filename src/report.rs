use crate::error::BulkDeleteReport;
use crate::filter::SuffixFilter;
use crate::types::Inventory;
use colored::Colorize;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use std::path::Path;

const KIB: f64 = 1_024.0;
const MIB: u64 = 1_024 * 1_024;

/// Human-readable size: below 1 MiB in KB, otherwise in MB, two decimals.
///
/// Midpoints round away from zero (0.125 KB is "0.13 KB"), not to even.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes < MIB {
        format!("{:.2} KB", round_cents(bytes as f64 / KIB))
    } else {
        format!("{:.2} MB", round_cents(bytes as f64 / KIB / KIB))
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Table of the snapshot, or `None` when there is nothing to show.
#[must_use]
pub fn inventory_table(inventory: &Inventory) -> Option<Table> {
    if inventory.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["#", "Filename", "Size", "Modified"]);

    for (i, entry) in inventory.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.name),
            Cell::new(format_size(entry.size)).set_alignment(CellAlignment::Right),
            Cell::new(entry.modified.format("%Y-%m-%d %H:%M")),
        ]);
    }

    table.add_row(vec![
        Cell::new(""),
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(format_size(inventory.total_size()))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);

    Some(table)
}

#[must_use]
pub fn heading(directory: &Path, filter: &SuffixFilter) -> String {
    format!(
        "=== {} Files in {} (Ver. {}) ===",
        filter.label(),
        directory.display(),
        env!("CARGO_PKG_VERSION")
    )
}

/// Render the current snapshot. Independent of when it was scanned.
pub fn print_inventory(directory: &Path, filter: &SuffixFilter, inventory: &Inventory) {
    println!("{}", heading(directory, filter).cyan());

    match inventory_table(inventory) {
        Some(table) => println!("{table}"),
        None => println!("No {} files found.", filter.label()),
    }

    println!("Total Files: {}", inventory.len().to_string().green());
}

pub fn print_bulk_report(report: &BulkDeleteReport) {
    println!(
        "Deleted {} file(s), {} already gone.",
        report.deleted.to_string().green(),
        report.skipped
    );
    if !report.is_clean() {
        println!("{}", format!("{} file(s) could not be deleted:", report.failures.len()).red());
        for failure in &report.failures {
            println!("  - {failure}");
        }
    }
}
