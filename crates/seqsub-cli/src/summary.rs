use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use seqsub_cli::validate::ValidationSummary;

pub fn print_summary(summary: &ValidationSummary) {
    println!("{}", summary_table(summary));
}

fn summary_table(summary: &ValidationSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);

    table.add_row(vec![
        Cell::new("File"),
        Cell::new(summary.path.display()),
    ]);
    table.add_row(vec![Cell::new("Mode"), Cell::new(summary.mode.as_str())]);
    table.add_row(vec![
        Cell::new("Submission header"),
        Cell::new(&summary.submission_header),
    ]);
    table.add_row(vec![
        Cell::new("Fasta id header"),
        match &summary.fasta_id_header {
            Some(header) => Cell::new(header),
            None => dim_cell("-"),
        },
    ]);
    table.add_row(vec![
        Cell::new("Entries")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.entries)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Fasta ids"),
        if summary.fasta_id_header.is_some() {
            Cell::new(summary.fasta_ids).set_alignment(CellAlignment::Right)
        } else {
            dim_cell("-")
        },
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
