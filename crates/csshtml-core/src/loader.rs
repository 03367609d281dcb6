use std::fs::{self, File};
use std::path::Path;

/// Whether `path` is a regular file that can be opened for reading.
pub fn is_readable(path: &Path) -> bool {
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    is_file && File::open(path).is_ok()
}

/// Load the trimmed text content of `path`.
///
/// An absent path and a missing or unreadable file all resolve to an empty
/// string, so "not specified" and "specified but blank" look the same to the
/// generator.
pub fn load(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    if !is_readable(path) {
        log::debug!("{} is not readable, using empty content", path.display());
        return String::new();
    }
    match fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            let trimmed = trim_content(&text);
            log::debug!("loaded {} bytes from {}", trimmed.len(), path.display());
            trimmed.to_string()
        }
        Err(err) => {
            log::debug!("failed to read {}: {err}", path.display());
            String::new()
        }
    }
}

// A leading BOM counts as whitespace.
fn trim_content(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
