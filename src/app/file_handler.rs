//! File system helpers for the application.
//!
//! Validates the graph file path, reads the raw graph text, writes rendered
//! results, and initializes the graph details log writer. Uses macros from
//! the parent `app` module for verbose logging.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Error as IoError, Write};
use std::path::Path;

use super::error::AppError;
use super::verbose_eprintln;

/// Validates the given graph file path and reads its contents.
///
/// Checks that the path exists and points to a file before reading.
///
/// # Errors
/// Returns `AppError::InvalidPath` if the path is invalid (not found or not
/// a file), or `AppError::Io` if reading fails.
pub fn validate_and_read_graph_file(
    graph_file_path: &Path,
    quiet_mode: bool,
) -> Result<String, AppError> {
    if !graph_file_path.exists() {
        let error_msg = format!("File not found: {}", graph_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    if !graph_file_path.is_file() {
        let error_msg = format!("Path is not a file: {}", graph_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }

    Ok(fs::read_to_string(graph_file_path)?)
}

/// Writes string content to a specified file, creating or overwriting it.
///
/// The writer is explicitly flushed so the caller sees the complete file
/// immediately after a successful call.
pub fn write_content_to_file(file_path: &Path, content: &str) -> Result<(), IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Initializes and returns a `BufWriter<File>` for the graph details log.
///
/// The file is truncated each run so the log only contains details from the
/// current execution. No flush here; the writer is flushed by its owner
/// (or on drop).
pub fn init_details_log_writer(file_path: &Path) -> Result<BufWriter<File>, IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_graph_file_is_an_invalid_path() {
        let path = PathBuf::from("no_such_graph_file.txt");
        let err = validate_and_read_graph_file(&path, true).unwrap_err();
        assert!(matches!(err, AppError::InvalidPath(_)));
    }

    #[test]
    fn directory_graph_path_is_an_invalid_path() {
        // temp_dir exists but is not a file.
        let dir = std::env::temp_dir();
        let err = validate_and_read_graph_file(&dir, true).unwrap_err();
        assert!(matches!(err, AppError::InvalidPath(_)));
    }
}
