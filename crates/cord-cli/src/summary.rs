//! Human-readable and JSON rendering of an analysis result.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cord_stats::CategoryCount;

use crate::types::AnalysisResult;

pub fn print_summary(result: &AnalysisResult) {
    println!("Metadata: {}", result.metadata_path.display());
    if let Some(path) = &result.export_path {
        println!("Exported: {}", path.display());
    }
    print_load_table(result);
    print_year_table(result);
    print_ranking_table("Top journals", &result.top_journals);
    print_ranking_table("Top sources", &result.top_sources);
    print_abstract_table(result);
}

/// Serialize the whole result to stdout as pretty JSON.
pub fn print_json(result: &AnalysisResult) -> Result<()> {
    let rendered = serde_json::to_string_pretty(result)?;
    println!("{rendered}");
    Ok(())
}

fn print_load_table(result: &AnalysisResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Rows read"),
        Cell::new(result.load.rows_read),
    ]);
    table.add_row(vec![
        Cell::new("Malformed rows skipped"),
        count_cell(result.load.malformed_rows),
    ]);
    table.add_row(vec![
        Cell::new("Blank rows skipped"),
        count_cell(result.load.blank_rows),
    ]);
    table.add_row(vec![
        Cell::new("Unparseable dates"),
        count_cell(result.clean.unparseable_dates),
    ]);
    table.add_row(vec![
        Cell::new("Rows dropped by cleaning"),
        count_cell(result.clean.rows_dropped()),
    ]);
    table.add_row(vec![
        Cell::new("Records after cleaning"),
        Cell::new(result.total_records).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Records matching filter"),
        Cell::new(result.filtered_records).add_attribute(Attribute::Bold),
    ]);
    if result.load.truncated {
        table.add_row(vec![
            Cell::new("Row cap reached").fg(Color::Yellow),
            Cell::new("yes").fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

fn print_year_table(result: &AnalysisResult) {
    if result.year_counts.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Year"), header_cell("Papers")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (year, count) in &result.year_counts {
        table.add_row(vec![Cell::new(year), Cell::new(count)]);
    }
    println!();
    println!("Papers per year:");
    println!("{table}");
}

fn print_ranking_table(title: &str, entries: &[CategoryCount]) {
    if entries.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Papers"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (rank, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            dim_cell(rank + 1),
            Cell::new(&entry.category),
            Cell::new(entry.count),
        ]);
    }
    println!();
    println!("{title}:");
    println!("{table}");
}

fn print_abstract_table(result: &AnalysisResult) {
    let Some(stats) = &result.abstract_words else {
        return;
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Abstracts"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Mean"),
        header_cell("Median"),
        header_cell("Std dev"),
    ]);
    apply_table_style(&mut table);
    for index in 0..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(stats.count),
        Cell::new(format!("{:.0}", stats.min)),
        Cell::new(format!("{:.0}", stats.max)),
        Cell::new(format!("{:.1}", stats.mean)),
        Cell::new(format!("{:.1}", stats.median)),
        Cell::new(format!("{:.1}", stats.std_dev)),
    ]);
    println!();
    println!("Abstract word counts:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
