use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rdc_cli::pipeline::CleanOutcome;

pub fn print_summary(outcome: &CleanOutcome) {
    let report = &outcome.batch.report;
    println!(
        "Table: {} -> {}",
        report.table,
        outcome.batch.destination()
    );
    println!("Input: {}", outcome.input.display());
    match &outcome.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Field"),
        header_cell("Rule"),
        header_cell("Rows in"),
        header_cell("Dropped"),
        header_cell("Nulled"),
        header_cell("Rewritten"),
        header_cell("Flagged"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for step in &report.steps {
        if step.skipped {
            table.add_row(vec![
                dim_cell(step.stage.display_name()),
                dim_cell(&step.field),
                dim_cell(format!("{} (column missing)", step.rule)),
                dim_cell(step.rows_in),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
            continue;
        }
        table.add_row(vec![
            Cell::new(step.stage.display_name()),
            Cell::new(&step.field)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&step.rule),
            Cell::new(step.rows_in),
            count_cell(step.counts.dropped, Color::Red),
            count_cell(step.counts.nulled, Color::Yellow),
            count_cell(step.counts.rewritten, Color::Green),
            count_cell(step.counts.flagged, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!("{} -> {} rows", report.input_rows, report.output_rows))
            .add_attribute(Attribute::Bold),
        Cell::new(report.input_rows).add_attribute(Attribute::Bold),
        count_cell(report.rows_dropped(), Color::Red).add_attribute(Attribute::Bold),
        count_cell(report.values_nulled(), Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(report.values_rewritten(), Color::Green).add_attribute(Attribute::Bold),
        count_cell(report.values_flagged(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !report.dropped_columns.is_empty() {
        println!("Dropped columns: {}", report.dropped_columns.join(", "));
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
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
