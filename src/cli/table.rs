//! Table formatting for catalog listings
//!
//! Every kind goes through the same path: records are flattened into string
//! cells by [`Table::from_records`] and then laid out with tabled, printed as
//! JSON, or reduced to ids.

use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_timestamp, truncate_str};
use crate::cli::OutputFormat;
use crate::core::export::{self, ExportError, Table, BOM};
use crate::core::record::Record;

const TIMESTAMP_COLUMNS: &[&str] = &["createdAt", "updatedAt"];

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Cells longer than this are cut with "..."
    pub max_cell_width: usize,
    /// Columns left out of the human-readable table
    pub hidden: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_cell_width: 40,
            hidden: Vec::new(),
        }
    }
}

/// Render records in the requested format
///
/// An empty slice renders as an empty string (or `[]` for JSON); the caller
/// decides what to say about it.
pub fn render<R: Record>(
    records: &[R],
    format: OutputFormat,
    config: &TableConfig,
) -> Result<String, ExportError> {
    if records.is_empty() {
        return Ok(match format {
            OutputFormat::Json => "[]".to_string(),
            _ => String::new(),
        });
    }

    match format {
        OutputFormat::Table => render_table(records, config),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => Ok(export::to_csv(records)?
            .trim_start_matches(BOM)
            .trim_end()
            .to_string()),
        OutputFormat::Id => Ok(records
            .iter()
            .map(|r| r.id().to_string())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn render_table<R: Record>(records: &[R], config: &TableConfig) -> Result<String, ExportError> {
    let table = Table::from_records(records)?;
    let visible: Vec<usize> = (0..table.headers.len())
        .filter(|&i| !config.hidden.contains(&table.headers[i]))
        .collect();

    let mut builder = Builder::default();
    builder.push_record(visible.iter().map(|&i| table.headers[i].clone()));
    for row in &table.rows {
        builder.push_record(visible.iter().map(|&i| {
            let cell = &row[i];
            if TIMESTAMP_COLUMNS.contains(&table.headers[i].as_str()) {
                format_timestamp(cell)
            } else {
                truncate_str(cell, config.max_cell_width)
            }
        }));
    }

    Ok(builder.build().with(Style::markdown()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Brand;
    use chrono::{TimeZone, Utc};

    fn brands() -> Vec<Brand> {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        vec![
            Brand::imported(1, "Guchi".into(), now),
            Brand::imported(2, "Prada".into(), now),
        ]
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let out = render(&brands(), OutputFormat::Table, &TableConfig::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("name"));
        assert!(lines[2].contains("Guchi"));
        assert!(lines[3].contains("Prada"));
    }

    #[test]
    fn test_hidden_columns() {
        let config = TableConfig {
            hidden: vec!["createdAt".into(), "updatedAt".into()],
            ..TableConfig::default()
        };
        let out = render(&brands(), OutputFormat::Table, &config).unwrap();
        assert!(!out.contains("createdAt"));
        assert!(out.contains("isActive"));
    }

    #[test]
    fn test_csv_and_ids() {
        let csv = render(&brands(), OutputFormat::Csv, &TableConfig::default()).unwrap();
        assert!(csv.starts_with("id,name,isActive,createdAt,updatedAt\n"));
        assert!(!csv.starts_with(BOM));

        let ids = render(&brands(), OutputFormat::Id, &TableConfig::default()).unwrap();
        assert_eq!(ids, "1\n2");
    }

    #[test]
    fn test_empty() {
        let none: Vec<Brand> = Vec::new();
        assert_eq!(render(&none, OutputFormat::Table, &TableConfig::default()).unwrap(), "");
        assert_eq!(render(&none, OutputFormat::Json, &TableConfig::default()).unwrap(), "[]");
    }
}
