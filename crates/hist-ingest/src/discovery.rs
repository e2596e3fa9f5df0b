//! Locating Symphony files under the Unicorn directory.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Unicorn directory on the production ILS.
pub const DEFAULT_UNICORN_PATH: &str = "/software/EDPL/Unicorn";

/// Standard file layout below a Unicorn directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymphonyPaths {
    root: PathBuf,
}

impl SymphonyPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Custom/cmdcode`
    pub fn command_codes(&self) -> PathBuf {
        self.root.join("Custom").join("cmdcode")
    }

    /// `Custom/datacode`
    pub fn data_codes(&self) -> PathBuf {
        self.root.join("Custom").join("datacode")
    }

    /// `Log/Hist`
    pub fn hist_dir(&self) -> PathBuf {
        self.root.join("Log").join("Hist")
    }

    /// Resolve a hist file argument: used as given when it exists, otherwise
    /// looked up in the hist directory.
    pub fn resolve_hist_file(&self, name: &Path) -> Result<PathBuf> {
        if name.is_file() {
            return Ok(name.to_path_buf());
        }
        let candidate = self.hist_dir().join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
        Err(IngestError::FileNotFound {
            path: name.to_path_buf(),
        })
    }
}

impl Default for SymphonyPaths {
    fn default() -> Self {
        Self::new(DEFAULT_UNICORN_PATH)
    }
}

/// Lists history logs in a directory (`*.hist`, `*.hist.gz`, `*.hist.Z`).
///
/// Returns files sorted by filename, which orders daily logs by date.
pub fn list_hist_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && is_hist_name(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_hist_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".hist") || name.ends_with(".hist.gz") || name.ends_with(".hist.Z")
}
