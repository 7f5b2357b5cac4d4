//! CSV import - turn an uploaded file into new catalog records
//!
//! Parsing is positional: the first line is a header and is skipped without
//! looking at it, and only the first column of each row is used (as the
//! record name). Rows with a blank first column are dropped. Either every
//! accepted row is merged or nothing is.

use csv::ReaderBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::controller::CrudController;
use crate::core::notify::NotificationKind;
use crate::core::record::Record;

/// Extensions offered by the file picker. Only comma-separated text is
/// actually parsed; anything else is read as text and usually fails.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no file selected")]
    NoFile,

    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("no rows with a name were found")]
    NoValidRows,
}

/// Names accepted from a file, plus what was dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedImport {
    pub names: Vec<String>,
    pub rows_read: usize,
    pub skipped: usize,
}

/// Outcome of a completed import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub imported: usize,
    pub skipped: usize,
    pub ids: Vec<u64>,
}

/// Everything after the first physical line
///
/// The csv reader would skip leading blank lines before taking a header, so
/// line 1 is cut off here instead, whatever it holds.
fn after_header(text: &str) -> &str {
    match text.find('\n') {
        Some(end) => &text[end + 1..],
        None => "",
    }
}

/// Parse comma-separated text into record names
pub fn parse_names(text: &str) -> Result<ParsedImport, ImportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(after_header(text).as_bytes());

    let mut parsed = ParsedImport::default();
    for result in rdr.records() {
        let record = result.map_err(|e| ImportError::Parse {
            line: e.position().map(|p| p.line() + 1).unwrap_or(0),
            message: e.to_string(),
        })?;
        parsed.rows_read += 1;

        match record.get(0).map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => parsed.names.push(name.to_string()),
            None => parsed.skipped += 1,
        }
    }

    if parsed.names.is_empty() {
        return Err(ImportError::NoValidRows);
    }
    Ok(parsed)
}

/// Read a file as UTF-8 text
pub fn read_source(path: &Path) -> Result<String, ImportError> {
    let bytes = fs::read(path).map_err(|source| ImportError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|e| ImportError::Unreadable {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })
}

/// Parse text and merge the accepted rows into a controller's store
pub fn import_text<R: Record>(
    controller: &mut CrudController<R>,
    text: &str,
) -> Result<ImportSummary, ImportError> {
    let parsed = parse_names(text)?;
    let merged = controller.merge_names(parsed.names);
    Ok(ImportSummary {
        rows_read: parsed.rows_read,
        imported: merged.len(),
        skipped: parsed.skipped,
        ids: merged.iter().map(Record::id).collect(),
    })
}

/// The file picker plus the import action behind it
///
/// The selection is cleared by every attempt, successful or not, so the
/// same file can be picked again. Taking `&mut self` keeps a second import
/// from starting while one runs.
#[derive(Debug, Default)]
pub struct ImportPipeline {
    selected: Option<PathBuf>,
}

impl ImportPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
            tracing::warn!(path = %path.display(), "unexpected import file extension");
        }
        self.selected = Some(path);
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// Import the selected file and report the result as a notification
    pub fn run<R: Record>(
        &mut self,
        controller: &mut CrudController<R>,
    ) -> Result<ImportSummary, ImportError> {
        let result = self
            .selected
            .take()
            .ok_or(ImportError::NoFile)
            .and_then(|path| read_source(&path))
            .and_then(|text| import_text(controller, &text));

        match &result {
            Ok(summary) => {
                tracing::info!(
                    kind = %R::KIND,
                    imported = summary.imported,
                    skipped = summary.skipped,
                    "import finished"
                );
                controller.notifier().notify(
                    &format!("Imported {} {}", summary.imported, R::KIND.plural()),
                    NotificationKind::Success,
                );
            }
            Err(e) => {
                tracing::warn!(kind = %R::KIND, "import failed: {}", e);
                controller
                    .notifier()
                    .notify(&format!("Import failed: {}", e), NotificationKind::Error);
            }
        }
        result
    }
}
