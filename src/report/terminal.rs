use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::models::LicenseRecord;

const PREVIEW_WIDTH: usize = 60;

/// Print what was written: a summary box and, when `verbose`, one row per license.
pub fn render(records: &[LicenseRecord], output: &Path, verbose: bool) {
    let packages: usize = records.iter().map(|r| r.dependencies.len()).sum();

    println!(
        "\n {} v{}",
        "generate-license-file".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Packages          : {}", packages));
    println!(" │  {:<48} │", format!("Distinct licenses : {}", records.len()));
    println!(" └────────────────────────────────────────────────────┘");
    println!(" {} {}\n", "✓".green(), output.display());

    if verbose && !records.is_empty() {
        println!("{}", summary_table(records));
    }
}

fn summary_table(records: &[LicenseRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Packages").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
        ]);

    for record in records {
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(&record.version),
            Cell::new(record.dependencies.len()).set_alignment(CellAlignment::Right),
            Cell::new(preview(&record.content)),
        ]);
    }

    table
}

/// First non-empty line of a license, shortened for the table.
fn preview(content: &str) -> String {
    let line = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");

    if line.chars().count() > PREVIEW_WIDTH {
        let short: String = line.chars().take(PREVIEW_WIDTH - 1).collect();
        format!("{}…", short)
    } else {
        line.to_string()
    }
}
