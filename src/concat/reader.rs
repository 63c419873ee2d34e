//! Reading candidate files as text

use std::fs;
use std::path::Path;

use crate::error::FileReadError;

/// Read a whole file as UTF-8 text, content kept byte-for-byte.
pub fn read_text_file(path: &Path) -> Result<String, FileReadError> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| e.utf8_error())?;
    Ok(text)
}
