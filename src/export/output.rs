use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::ExportError;
use crate::export::export_model::ExportFormat;

// ============================================================================
// Export files
// ============================================================================

/// `<prefix>-<YYYY-MM-DD>.<md|pdf>`
pub fn export_filename(prefix: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}-{}.{}",
        sanitize_prefix(prefix),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Sanitize a filename prefix; falls back to "checklist" when nothing is left.
pub fn sanitize_prefix(prefix: &str) -> String {
    let cleaned: String = prefix
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .trim_matches('-')
        .to_lowercase();

    if cleaned.is_empty() {
        "checklist".to_string()
    } else {
        cleaned
    }
}

/// Write export bytes atomically: the target either receives the complete
/// content or is left untouched.
pub fn write_export(path: &Path, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(io_error)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_error)?;
    tmp.write_all(bytes).map_err(io_error)?;
    tmp.as_file().sync_all().map_err(io_error)?;
    tmp.persist(path).map_err(|e| io_error(e.error))?;

    info!(path = %path.display(), bytes = bytes.len(), "checklist written");
    Ok(path.to_path_buf())
}
