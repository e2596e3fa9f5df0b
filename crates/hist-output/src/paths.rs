use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};

/// `<output_dir>/<stem>.json` for a hist file. Compression suffixes are
/// dropped, so `20230118.hist.gz` becomes `20230118.json`.
pub fn output_path_for(hist_file: &Path, output_dir: &Path) -> Result<PathBuf> {
    let name = hist_file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| OutputError::NoFileStem {
            path: hist_file.to_path_buf(),
        })?;
    let mut stem = name;
    for suffix in [".gz", ".Z", ".hist"] {
        stem = stem.strip_suffix(suffix).unwrap_or(stem);
    }
    if stem.is_empty() {
        return Err(OutputError::NoFileStem {
            path: hist_file.to_path_buf(),
        });
    }
    Ok(output_dir.join(format!("{stem}.json")))
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Create the output file, and its directory if needed.
pub fn create_output_file(path: &Path) -> Result<BufWriter<File>> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}
