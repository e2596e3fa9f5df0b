//! Item keys and the barcode index.

use std::collections::HashMap;
use std::fmt;

/// Symphony item key: catalog key, call sequence and copy number.
///
/// Displays as `ckey|seq|copy|`, which is the lookup key format of the
/// barcode index (`selitem -oIB` output with the barcode column removed).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub catalog_key: String,
    pub call_sequence: String,
    pub copy_number: String,
}

impl ItemKey {
    pub fn new(
        catalog_key: impl Into<String>,
        call_sequence: impl Into<String>,
        copy_number: impl Into<String>,
    ) -> Self {
        Self {
            catalog_key: catalog_key.into(),
            call_sequence: call_sequence.into(),
            copy_number: copy_number.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|",
            self.catalog_key, self.call_sequence, self.copy_number
        )
    }
}

/// Maps `ckey|seq|copy|` strings to item barcodes. Read-only while
/// translating.
#[derive(Debug, Clone, Default)]
pub struct BarcodeIndex {
    barcodes: HashMap<String, String>,
}

impl BarcodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ItemKey, barcode: impl Into<String>) -> Option<String> {
        self.barcodes.insert(key.to_string(), barcode.into())
    }

    /// Insert using an already joined `ckey|seq|copy|` key.
    pub fn insert_raw(&mut self, key: impl Into<String>, barcode: impl Into<String>) {
        self.barcodes.insert(key.into(), barcode.into());
    }

    pub fn lookup(&self, key: &ItemKey) -> Option<&str> {
        self.barcodes.get(&key.to_string()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.barcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barcodes.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for BarcodeIndex
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (key, barcode) in iter {
            index.insert_raw(key, barcode);
        }
        index
    }
}
