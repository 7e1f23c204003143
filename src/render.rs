//! Output formatting for CLI results

use crate::key::{CompositeKey, Payload, Record};

const HEADERS: [&str; 4] = ["note_holder", "note_created_date", "note_title", "note_content"];

/// Render a partition scan as a Markdown-style table.
///
/// Columns are padded to the widest cell. An empty scan renders a
/// "no records" line instead of an empty table.
pub fn format_partition(partition_key: &str, records: &[Record]) -> String {
    if records.is_empty() {
        return format!("No records found for primary key: {}", partition_key);
    }

    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|record| {
            [
                record.key.partition_key.clone(),
                record.key.sort_key.to_string(),
                record.title.clone(),
                record.content.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&HEADERS, &widths));
    lines.push(format!(
        "|{}|",
        widths.iter().map(|width| "-".repeat(width + 2)).collect::<Vec<_>>().join("|")
    ));
    lines.extend(rows.iter().map(|row| format_row(row, &widths)));

    lines.join("\n")
}

/// Render the result of a point lookup
pub fn format_lookup(key: &CompositeKey, payload: Option<&Payload>) -> String {
    match payload {
        Some(payload) => format!(
            "Retrieved: {} {} {} {}",
            key.partition_key, key.sort_key, payload.title, payload.content
        ),
        None => format!("Item not found: {} {}", key.partition_key, key.sort_key),
    }
}

fn format_row<S: AsRef<str>>(cells: &[S], widths: &[usize; 4]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!(" {:<width$} ", cell.as_ref(), width = width))
        .collect();
    format!("|{}|", cells.join("|"))
}
