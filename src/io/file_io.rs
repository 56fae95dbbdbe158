use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::section::TodoSection;
use crate::parse::parse_sections;

/// Error type for reading the checklist document
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("{path} does not exist")]
    NotFound { path: PathBuf },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("file watch failed: {0}")]
    Watch(#[from] notify::Error),
}

/// Resolve the document path to an absolute path and check that it exists.
pub fn resolve_document(path: &Path) -> Result<PathBuf, DocError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| DocError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?
            .join(path)
    };
    if !absolute.is_file() {
        return Err(DocError::NotFound { path: absolute });
    }
    Ok(absolute)
}

/// Read the document and parse it into sections.
/// Parsing itself cannot fail, so every error here comes from the filesystem.
pub fn read_and_parse(path: &Path) -> Result<Vec<TodoSection>, DocError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DocError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DocError::ReadError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    Ok(parse_sections(&text))
}
