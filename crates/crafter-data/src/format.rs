//! Format detection (RON/JSON/TOML), data file discovery, and deserialization
//! helpers used by the record sources.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::loader::DataLoadError;

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

const EXTENSIONS: [&str; 3] = ["ron", "toml", "json"];

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in &EXTENSIONS {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Every data file under `dir`, recursively, in sorted path order. Files
/// without a supported extension and hidden entries are skipped.
pub fn data_files_in(dir: &Path) -> Result<Vec<PathBuf>, DataLoadError> {
    let mut files = Vec::new();
    collect_data_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_data_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), DataLoadError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }

        if file_type.is_dir() {
            collect_data_files(&path, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::trace!(dir = %path.display(), "skipping symlinked directory");
        } else if detect_format(&path).is_ok() {
            files.push(path);
        } else {
            tracing::trace!(file = %path.display(), "skipping non-data file");
        }
    }
    Ok(())
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

fn parse_str<T: DeserializeOwned>(format: Format, content: &str, path: &Path) -> Result<T, DataLoadError> {
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(path, e)),
    }
}

/// Whether the first token of `content`, past whitespace and comments, opens
/// a list. Only used to choose which error to report.
fn looks_like_list(format: Format, content: &str) -> bool {
    let mut rest = content.trim_start();
    if format == Format::Ron {
        loop {
            if let Some(after) = rest.strip_prefix("//") {
                rest = after.split_once('\n').map_or("", |(_, tail)| tail).trim_start();
            } else if let Some(after) = rest.strip_prefix("/*") {
                rest = after.split_once("*/").map_or("", |(_, tail)| tail).trim_start();
            } else if let Some(after) = rest.strip_prefix("#![") {
                rest = after.split_once(']').map_or("", |(_, tail)| tail).trim_start();
            } else {
                break;
            }
        }
    }
    rest.starts_with('[')
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_str(format, &content, path)
}

/// Deserialize the records held in one file, which may contain a single
/// record or a list of them.
///
/// RON and JSON content is read as a list first, then as a single record.
/// A TOML file holds a list when its top-level table has an array under
/// `toml_key`; otherwise the whole table is one record.
pub fn deserialize_records<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron | Format::Json => match parse_str::<Vec<T>>(format, &content, path) {
            Ok(records) => Ok(records),
            Err(list_err) => match parse_str::<T>(format, &content, path) {
                Ok(record) => Ok(vec![record]),
                // A list that fails part way reports the list error.
                Err(_) if looks_like_list(format, &content) => Err(list_err),
                Err(record_err) => Err(record_err),
            },
        },
        Format::Toml => {
            let mut table: toml::Table = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            match table.remove(toml_key) {
                Some(array @ toml::Value::Array(_)) => array
                    .try_into()
                    .map_err(|e: toml::de::Error| parse_error(path, e)),
                Some(other) => Err(parse_error(
                    path,
                    format!("key '{toml_key}' must be an array, found {}", other.type_str()),
                )),
                None => toml::Value::Table(table)
                    .try_into()
                    .map(|record| vec![record])
                    .map_err(|e: toml::de::Error| parse_error(path, e)),
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
