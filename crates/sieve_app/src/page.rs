use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sieve_engine::{decode_page, DecodeError, Document};
use sieve_logging::sieve_info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("{path:?}: {source}")]
    Decode { path: PathBuf, source: DecodeError },
}

/// Reads a saved page or fragment as UTF-8 text.
pub fn read_markup(path: &Path, charset: Option<&str>) -> Result<String, PageError> {
    let bytes = fs::read(path).map_err(|source| PageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = decode_page(&bytes, charset).map_err(|source| PageError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    sieve_info!(
        "Read {:?} ({} bytes, {})",
        path,
        bytes.len(),
        decoded.encoding_label
    );
    Ok(decoded.html)
}

/// Loads a page snapshot as the live host document at `location`.
pub fn load_document(
    path: &Path,
    charset: Option<&str>,
    location: &str,
) -> Result<Document, PageError> {
    let html = read_markup(path, charset)?;
    Ok(Document::parse(&html, location))
}
