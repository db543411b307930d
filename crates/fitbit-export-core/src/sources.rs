use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ExportError, Result};

/// Expands a filename pattern under `dir`, keeping regular files only.
/// At least one match is required.
pub(crate) fn matching_files(dir: &Path, pattern: &'static str) -> Result<Vec<PathBuf>> {
    let full_pattern = dir.join(pattern);
    let mut paths = Vec::new();
    for entry in glob::glob(&full_pattern.to_string_lossy())? {
        let path = entry.map_err(|err| ExportError::Io(err.into_error()))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(ExportError::NoMatchingFiles {
            pattern,
            dir: dir.to_path_buf(),
        });
    }
    Ok(paths)
}

/// Reads one export file as a JSON array of records. A document that decodes
/// to zero records is an error, not an empty contribution.
pub(crate) fn read_document(path: &Path) -> Result<Vec<Value>> {
    let contents = fs::read_to_string(path)?;
    let records: Vec<Value> = serde_json::from_str(&contents)?;
    if records.is_empty() {
        return Err(ExportError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }
    Ok(records)
}
