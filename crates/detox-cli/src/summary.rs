use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::PrepareResult;

pub fn print_summary(result: &PrepareResult) {
    println!("Corpus: {}", result.input.display());
    println!("Output: {}", result.output_dir.display());
    if result.dry_run {
        println!("Dry run: no files written");
    }

    let summary = &result.summary;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![
        Cell::new("Loaded"),
        Cell::new(summary.loaded_rows),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("Uncertain band removed"),
        Cell::new(summary.band_removed_rows),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("Cleaned"),
        Cell::new(summary.cleaned_rows),
        file_cell(summary.outputs.cleaned.as_ref()),
    ]);
    table.add_row(vec![
        Cell::new("Train"),
        Cell::new(summary.train_rows),
        file_cell(summary.outputs.train.as_ref()),
    ]);
    table.add_row(vec![
        Cell::new("Validation"),
        Cell::new(summary.valid_rows),
        file_cell(summary.outputs.validation.as_ref()),
    ]);
    table.add_row(vec![
        Cell::new("Test"),
        Cell::new(summary.test_rows),
        file_cell(summary.outputs.test.as_ref()),
    ]);
    println!("{table}");
}

fn file_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            Cell::new(name).fg(Color::Green)
        }
        None => dim_cell("-"),
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
