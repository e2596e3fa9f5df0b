//! Item-key correlation.
//!
//! A history line carries the parts of an item key as separate fields:
//! catalog key, call sequence and copy number. The correlator collects them
//! in that fixed order, whatever order they appear in on the line, and looks
//! the assembled key up in the barcode index.

use hist_model::{BarcodeIndex, ItemKey};

/// Per-record accumulator for the three item-key parts.
#[derive(Debug, Clone, Default)]
pub struct ItemKeyCorrelator {
    catalog_key: Option<String>,
    call_sequence: Option<String>,
    copy_number: Option<String>,
    attempted: bool,
}

impl ItemKeyCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_catalog_key(&mut self, value: &str) {
        self.catalog_key = Some(value.to_string());
    }

    pub fn observe_call_sequence(&mut self, value: &str) {
        self.call_sequence = Some(value.to_string());
    }

    pub fn observe_copy_number(&mut self, value: &str) {
        self.copy_number = Some(value.to_string());
    }

    /// The assembled key, once all three parts have been observed.
    pub fn item_key(&self) -> Option<ItemKey> {
        match (&self.catalog_key, &self.call_sequence, &self.copy_number) {
            (Some(catalog_key), Some(call_sequence), Some(copy_number)) => Some(ItemKey::new(
                catalog_key.as_str(),
                call_sequence.as_str(),
                copy_number.as_str(),
            )),
            _ => None,
        }
    }

    /// Look up the item barcode.
    ///
    /// Returns `None` until a copy number and both other parts have been
    /// observed. The lookup runs at most once per record; later calls
    /// return `None`, so the caller writes `item_id` a single time.
    pub fn resolve(&mut self, index: &BarcodeIndex) -> Option<String> {
        if self.attempted {
            return None;
        }
        let key = self.item_key()?;
        self.attempted = true;
        let barcode = index.lookup(&key).map(str::to_string);
        if barcode.is_none() {
            tracing::debug!(item_key = %key, "item key not in barcode index");
        }
        barcode
    }
}
