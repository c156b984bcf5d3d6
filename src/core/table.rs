use crate::domain::model::{Cell, Column, DisplayGrid, Record};
use serde_json::Value;

/// Project `rows` through `columns` into a display grid.
///
/// Column order is display order and row order is input order. A column's
/// render transform receives `(row[key], row)`; without one the cell is the
/// string form of the value, empty when the value is null or absent.
pub fn render(columns: &[Column], rows: &[Record]) -> DisplayGrid {
    let headers = columns.iter().map(|c| c.header.clone()).collect();

    let rows = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    let value = row.get(&column.key);
                    match &column.render {
                        Some(render) => render(value, row),
                        None => Cell::text(stringify(value)),
                    }
                })
                .collect()
        })
        .collect();

    DisplayGrid { headers, rows }
}

pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
