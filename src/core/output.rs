use crate::domain::model::{Cell, DisplayGrid};
use crate::utils::error::{HubError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MAX_CELL_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
    Html,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            _ => Err(HubError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: s.to_string(),
                reason: "Valid formats: table, csv, tsv, json, html".to_string(),
            }),
        }
    }
}

/// 依格式輸出表格內容
pub fn format_grid(
    grid: &DisplayGrid,
    format: OutputFormat,
    title: &str,
    max_cell_width: usize,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(to_text_table(grid, max_cell_width)),
        OutputFormat::Csv => to_delimited(grid, b','),
        OutputFormat::Tsv => to_delimited(grid, b'\t'),
        OutputFormat::Json => to_json(grid),
        OutputFormat::Html => Ok(to_html(grid, title)),
    }
}

pub fn to_text_table(grid: &DisplayGrid, max_cell_width: usize) -> String {
    if grid.is_empty() {
        return "No rows.".to_string();
    }

    let header: Vec<String> = grid
        .headers
        .iter()
        .map(|h| truncate(h, max_cell_width))
        .collect();
    let body: Vec<Vec<String>> = grid
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| truncate(&single_line(cell.plain_text()), max_cell_width))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    // 欄位數不一致時以最寬的一列為準
    for row in &body {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(pad_line(&header, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &body {
        lines.push(pad_line(row, &widths));
    }
    lines.join("\n")
}

fn pad_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn to_delimited(grid: &DisplayGrid, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&grid.headers)?;
    for row in &grid.rows {
        writer.write_record(row.iter().map(Cell::plain_text))?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| HubError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| HubError::ConfigError {
        message: format!("Output is not valid UTF-8: {}", e),
    })
}

fn to_json(grid: &DisplayGrid) -> Result<String> {
    let rows: Vec<Value> = grid
        .rows
        .iter()
        .map(|row| {
            let object: Map<String, Value> = grid
                .headers
                .iter()
                .zip(row)
                .map(|(header, cell)| (header.clone(), Value::String(cell.plain_text().to_string())))
                .collect();
            Value::Object(object)
        })
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn to_html(grid: &DisplayGrid, title: &str) -> String {
    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(title)));
    html.push_str(&format!("<p>Generated at {}</p>\n", generated_at));
    html.push_str("<table>\n<thead>\n<tr>");
    for header in &grid.headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &grid.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", cell_to_html(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn cell_to_html(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(text) => escape_html(text),
        Cell::Link { text, href } => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a>",
            escape_html(href),
            escape_html(text)
        ),
        Cell::Image { src, alt, href } => {
            let img = format!(
                "<img src=\"{}\" alt=\"{}\" width=\"120\">",
                escape_html(src),
                escape_html(alt)
            );
            match href {
                Some(href) => format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a>",
                    escape_html(href),
                    img
                ),
                None => img,
            }
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
