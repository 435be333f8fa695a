//! Reader for pasted delivery rows saved to disk
//!
//! Spreadsheet exports on Brazilian Windows machines are often
//! Windows-1252 rather than UTF-8.

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::warn;

use fleetboard_types::{Error, Result};

/// Read a text file as UTF-8, falling back to Windows-1252
pub fn read_rows_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    Ok(decode_rows(&bytes, &path.display().to_string()))
}

/// Decode raw bytes; `source` only labels the log line
pub fn decode_rows(bytes: &[u8], source: &str) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warn!(source, "input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}
