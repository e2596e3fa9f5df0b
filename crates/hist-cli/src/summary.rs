use std::fmt::Write as _;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hist_model::placeholder_name;

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    let text = render_summary(result);
    if result.json_on_stdout {
        eprint!("{text}");
    } else {
        print!("{text}");
    }
    if result.has_failures() {
        eprintln!("Errors:");
        for failure in &result.failures {
            eprintln!("- {}: {}", failure.hist_file.display(), failure.message);
        }
    }
}

pub fn render_summary(result: &RunResult) -> String {
    let mut out = String::new();

    let mut totals = Table::new();
    totals.set_header(vec![header_cell("Total"), header_cell("Count")]);
    apply_summary_table_style(&mut totals);
    align_column(&mut totals, 1, CellAlignment::Right);
    let counts = &result.counts;
    totals.add_row(vec![Cell::new("cmd codes read"), Cell::new(counts.command_codes)]);
    totals.add_row(vec![Cell::new("data codes read"), Cell::new(counts.data_codes)]);
    totals.add_row(vec![Cell::new("client types read"), Cell::new(counts.client_types)]);
    totals.add_row(vec![Cell::new("items read"), Cell::new(counts.items)]);
    if counts.malformed_items > 0 {
        totals.add_row(vec![
            dim_cell("malformed item lines"),
            count_cell(counts.malformed_items as u64, Color::Yellow),
        ]);
    }
    totals.add_row(vec![
        Cell::new("history records").add_attribute(Attribute::Bold),
        Cell::new(result.records).add_attribute(Attribute::Bold),
    ]);
    totals.add_row(vec![Cell::new("errors"), count_cell(result.errors, Color::Red)]);
    let _ = writeln!(out, "{totals}");

    if !result.files.is_empty() {
        let mut files = Table::new();
        files.set_header(vec![
            header_cell("Hist file"),
            header_cell("Output"),
            header_cell("Lines"),
            header_cell("Records"),
            header_cell("Errors"),
        ]);
        apply_table_style(&mut files);
        for column in 2..=4 {
            align_column(&mut files, column, CellAlignment::Right);
        }
        for file in &result.files {
            let output = match &file.output {
                Some(path) => Cell::new(path.display()),
                None => dim_cell("stdout"),
            };
            files.add_row(vec![
                Cell::new(file.hist_file.display()).fg(Color::Blue),
                output,
                Cell::new(file.stats.lines),
                Cell::new(file.stats.records),
                count_cell(file.stats.errors, Color::Red),
            ]);
        }
        let _ = writeln!(out, "{files}");
    }

    if !result.missing.is_empty() {
        let _ = writeln!(
            out,
            "Data codes without definitions have been recorded as 'data_code_<code>':"
        );
        let mut missing = Table::new();
        missing.set_header(vec![
            header_cell("Line"),
            header_cell("Code"),
            header_cell("Recorded as"),
        ]);
        apply_table_style(&mut missing);
        align_column(&mut missing, 0, CellAlignment::Right);
        for (line, code) in result.missing.iter() {
            missing.add_row(vec![
                Cell::new(line),
                Cell::new(code).fg(Color::Yellow),
                dim_cell(placeholder_name(code)),
            ]);
        }
        let _ = writeln!(out, "{missing}");
    }
    out
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
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

fn count_cell(count: u64, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
