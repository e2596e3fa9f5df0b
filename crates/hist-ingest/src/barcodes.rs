//! Item key to barcode index, from `selitem -oIB` output.
//!
//! Each line is `ckey|seq|copy|barcode|`, e.g. `12345|55|1|31221012345678|`.

use std::path::Path;

use hist_model::{BarcodeIndex, ItemKey};

use crate::error::Result;
use crate::reader::read_text_lines;

/// A loaded barcode index and the number of lines that could not be used.
#[derive(Debug, Clone, Default)]
pub struct BarcodeLoad {
    pub index: BarcodeIndex,
    pub malformed: usize,
}

/// Parse one `selitem -oIB` line. `None` when it has fewer than four fields.
pub fn parse_barcode_line(line: &str) -> Option<(ItemKey, String)> {
    let mut parts = line.split('|');
    let catalog_key = parts.next()?;
    let call_sequence = parts.next()?;
    let copy_number = parts.next()?;
    let barcode = parts.next()?;
    Some((
        ItemKey::new(catalog_key, call_sequence, copy_number),
        barcode.trim_end().to_string(),
    ))
}

pub fn load_barcode_index(path: &Path) -> Result<BarcodeLoad> {
    let mut load = BarcodeLoad::default();
    for (index, line) in read_text_lines(path)?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_barcode_line(line) {
            Some((key, barcode)) => {
                load.index.insert(key, barcode);
            }
            None => {
                load.malformed += 1;
                tracing::warn!(path = %path.display(), line = index + 1, "malformed item line");
            }
        }
    }
    tracing::debug!(
        path = %path.display(),
        items = load.index.len(),
        malformed = load.malformed,
        "loaded barcode index"
    );
    Ok(load)
}
