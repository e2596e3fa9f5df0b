//! Data model for Symphony history translation.
//!
//! The types in this crate are shared by the transform, ingest, output and
//! CLI crates. None of them perform I/O.

pub mod barcode;
pub mod code_table;
pub mod error;
pub mod missing;
pub mod options;
pub mod record;

pub use barcode::{BarcodeIndex, ItemKey};
pub use code_table::{CodeDomain, CodeTable, is_placeholder, placeholder_name};
pub use error::{HistError, Result};
pub use missing::MissingCodeTracker;
pub use options::FormatOptions;
pub use record::Record;
