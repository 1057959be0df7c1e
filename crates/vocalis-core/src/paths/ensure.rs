//! Output directory preparation.

use std::fs;
use std::path::Path;

use super::error::PathError;

/// Create the output directory if it is missing and check that it accepts writes.
///
/// Safe to call when the directory already exists. A regular file at `path`
/// is reported as [`PathError::NotADirectory`] instead of being replaced.
pub fn ensure_output_dir(path: &Path) -> Result<(), PathError> {
    if path.exists() && !path.is_dir() {
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    probe_writable(path)
}

/// Write and remove a marker file to prove the engine will be able to write here.
fn probe_writable(path: &Path) -> Result<(), PathError> {
    let marker = path.join(format!(".vocalis_probe_{}", std::process::id()));

    fs::write(&marker, b"").map_err(|e| PathError::NotWritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let _ = fs::remove_file(&marker);
    Ok(())
}
