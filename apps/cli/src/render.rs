use std::fmt::Write;

use tracker_core::Aggregates;

use crate::args::OutputFormat;

pub fn render(aggregates: &Aggregates, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(aggregates)
            .map(|mut out| {
                out.push('\n');
                out
            })
            .map_err(|err| format!("serialize tables: {}", err)),
        OutputFormat::Text => Ok(render_text(aggregates)),
    }
}

fn render_text(aggregates: &Aggregates) -> String {
    let mut out = String::new();
    let rows: Vec<Vec<String>> = aggregates
        .by_subcategory
        .iter()
        .map(|row| vec![display_label(&row.subcategory), hours(row.duration)])
        .collect();
    write_table(&mut out, "Hours by subcategory", &["subcategory", "hours"], &rows);

    let rows: Vec<Vec<String>> = aggregates
        .by_month
        .iter()
        .map(|row| vec![row.year_month.clone(), hours(row.duration)])
        .collect();
    write_table(&mut out, "Hours by month", &["month", "hours"], &rows);

    let rows: Vec<Vec<String>> = aggregates
        .by_category_month
        .iter()
        .map(|row| {
            vec![
                row.year_month.clone(),
                row.category.clone(),
                display_label(&row.subcategory),
                hours(row.duration),
            ]
        })
        .collect();
    write_table(
        &mut out,
        "Hours by category and month",
        &["month", "category", "subcategory", "hours"],
        &rows,
    );
    out
}

fn write_table(out: &mut String, title: &str, header: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }
    let _ = writeln!(out, "{title}");
    let header: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
    write_row(out, &header, &widths);
    for row in rows {
        write_row(out, row, &widths);
    }
    out.push('\n');
}

fn write_row(out: &mut String, row: &[String], widths: &[usize]) {
    let last = row.len().saturating_sub(1);
    for (idx, cell) in row.iter().enumerate() {
        if idx == last {
            let _ = write!(out, "{:>width$}", cell, width = widths[idx]);
        } else {
            let _ = write!(out, "{:<width$}  ", cell, width = widths[idx]);
        }
    }
    out.push('\n');
}

fn display_label(value: &str) -> String {
    if value.is_empty() {
        "(?)".to_string()
    } else {
        value.to_string()
    }
}

fn hours(value: f64) -> String {
    format!("{:.2}", value)
}
