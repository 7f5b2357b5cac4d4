//! Tabular export - CSV and Excel-compatible HTML
//!
//! Columns come from the keys of the first record, in serialization order.
//! Every record of a kind serializes the same keys (absent values are
//! `null`), so the header fits all rows.

use chrono::NaiveDate;
use clap::ValueEnum;
use rust_embed::Embed;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use thiserror::Error;

use crate::core::record::EntityKind;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const SPREADSHEET_TEMPLATE: &str = "spreadsheet.xls";

/// Byte-order mark so spreadsheet tools detect UTF-8
pub const BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the table is empty")]
    Empty,

    #[error("record {index} is not a flat object")]
    NotAnObject { index: usize },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to render spreadsheet: {0}")]
    Template(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xls,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xls => "xls",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xls" | "excel" => Ok(ExportFormat::Xls),
            _ => Err(format!("Unknown export format: {}. Use csv or xls", s)),
        }
    }
}

/// Header plus stringified cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Flatten serializable records into a string table
    pub fn from_records<T: Serialize>(records: &[T]) -> Result<Self, ExportError> {
        let mut objects = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match serde_json::to_value(record)? {
                Value::Object(map) => objects.push(map),
                _ => return Err(ExportError::NotAnObject { index }),
            }
        }

        let headers: Vec<String> = objects.first().ok_or(ExportError::Empty)?.keys().cloned().collect();
        let rows = objects
            .iter()
            .map(|obj| {
                headers
                    .iter()
                    .map(|h| obj.get(h).map(stringify).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Self { headers, rows })
    }
}

/// Render one JSON value as a cell; null becomes empty
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Escape text for an HTML cell
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// CSV text with a leading BOM
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    let table = Table::from_records(records)?;

    let mut out = String::new();
    out.push(BOM);
    let header: Vec<String> = table.headers.iter().map(|h| escape_csv(h)).collect();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|c| escape_csv(c)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    Ok(out)
}

/// Renders the Excel-flavoured HTML table
pub struct SpreadsheetRenderer {
    tera: Tera,
}

fn xls_escape(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(escape_html(&stringify(value))))
}

impl SpreadsheetRenderer {
    pub fn new() -> Result<Self, ExportError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("xls_escape", xls_escape);

        let file = EmbeddedTemplates::get(SPREADSHEET_TEMPLATE)
            .ok_or_else(|| ExportError::Template(format!("{} not embedded", SPREADSHEET_TEMPLATE)))?;
        let source = std::str::from_utf8(&file.data)
            .map_err(|e| ExportError::Template(e.to_string()))?;
        tera.add_raw_template(SPREADSHEET_TEMPLATE, source)
            .map_err(|e| ExportError::Template(e.to_string()))?;

        Ok(Self { tera })
    }

    pub fn render<T: Serialize>(&self, records: &[T], sheet: &str) -> Result<String, ExportError> {
        let table = Table::from_records(records)?;

        let mut ctx = Context::new();
        ctx.insert("sheet", sheet);
        ctx.insert("headers", &table.headers);
        ctx.insert("rows", &table.rows);

        self.tera
            .render(SPREADSHEET_TEMPLATE, &ctx)
            .map_err(|e| ExportError::Template(e.to_string()))
    }
}

/// Serialize records in the requested format
pub fn export<T: Serialize>(records: &[T], format: ExportFormat, sheet: &str) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Xls => SpreadsheetRenderer::new()?.render(records, sheet),
    }
}

/// `brand_2024-01-15.csv`
pub fn default_file_name(kind: EntityKind, format: ExportFormat, date: NaiveDate) -> String {
    format!("{}_{}.{}", kind.as_str(), date.format("%Y-%m-%d"), format.extension())
}

/// Write an export into `dir/file_name`
///
/// Content goes to a temporary file in the same directory first and is
/// renamed into place; the temporary file is removed if anything fails.
pub fn save(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, ExportError> {
    let target = dir.join(file_name);
    let io_err = |source| ExportError::Io {
        path: target.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".dca-export")
        .tempfile_in(dir)
        .map_err(io_err)?;
    tmp.write_all(contents.as_bytes()).map_err(io_err)?;
    tmp.persist(&target).map_err(|e| io_err(e.error))?;

    tracing::debug!(path = %target.display(), bytes = contents.len(), "export saved");
    Ok(target)
}
