//! Shared extraction entry points used by the CLI and tests.

use std::path::{Path, PathBuf};

use crate::backend::BackendError;
use crate::extractor::{self, DeviceRecord};

#[derive(Debug, thiserror::Error)]
pub enum DeviceInfoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("{0}")]
    Other(String),
}

/// Per-file extraction result with the record and fill counts.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub file: PathBuf,
    pub record: DeviceRecord,
    pub stats: FieldStats,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldStats {
    pub filled: usize,
    pub missing: usize,
}

impl ExtractionReport {
    fn new(file: PathBuf, record: DeviceRecord) -> Self {
        let filled = record.filled_count();
        Self {
            file,
            record,
            stats: FieldStats {
                filled,
                missing: DeviceRecord::FIELD_COUNT - filled,
            },
        }
    }

    /// True when no field could be extracted.
    pub fn is_empty(&self) -> bool {
        self.stats.filled == 0
    }
}

/// Recursively discover paste files (`.txt`) in a directory, sorted for
/// stable output.
pub fn discover_paste_files(dir: &Path) -> Result<Vec<PathBuf>, DeviceInfoError> {
    let mut files = Vec::new();
    walk_dir(dir, &mut files, 0)?;
    files.sort();
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>, depth: usize) -> Result<(), DeviceInfoError> {
    if depth > 20 {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with('.') || name == "node_modules" || name == "target" {
                continue;
            }
            walk_dir(&path, files, depth + 1)?;
        } else if path.is_file() {
            if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
                if ext == "txt" {
                    files.push(path);
                }
            }
        }
    }
    Ok(())
}

/// Core extraction API shared by the CLI and the embedding UI.
pub struct DeviceInfoCore;

impl DeviceInfoCore {
    /// Extract a record from already-loaded text. Infallible.
    pub fn extract_text(text: &str) -> DeviceRecord {
        extractor::extract(text)
    }

    /// Extract a record from a single paste file.
    pub fn extract_file(path: &Path) -> Result<ExtractionReport, DeviceInfoError> {
        let text = std::fs::read_to_string(path)?;
        let record = extractor::extract(&text);
        if record.is_empty() {
            tracing::warn!(file = %path.display(), "no fields extracted");
        }
        Ok(ExtractionReport::new(path.to_path_buf(), record))
    }

    /// Extract records from every paste file under a directory.
    pub fn extract_batch(dir: &Path) -> Result<Vec<ExtractionReport>, DeviceInfoError> {
        let files = discover_paste_files(dir)?;
        let mut reports = Vec::new();
        for path in files {
            reports.push(Self::extract_file(&path)?);
        }
        Ok(reports)
    }

    /// Build a report for text that did not come from a file (stdin).
    pub fn report_for_text(source: &str, text: &str) -> ExtractionReport {
        ExtractionReport::new(PathBuf::from(source), extractor::extract(text))
    }
}
