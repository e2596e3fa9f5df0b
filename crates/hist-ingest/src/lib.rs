//! Symphony history ingestion.
//!
//! This crate loads everything the translator needs from disk:
//!
//! - **Code tables**: `cmdcode` and `datacode` definition files
//! - **Client types**: a JSON client table
//! - **Barcode index**: `selitem -oIB` item key / barcode listings
//! - **Hist files**: plain or gzip history logs, decoded from ISO-8859-1
//! - **Discovery**: the Unicorn directory layout
//!
//! # Example
//!
//! ```ignore
//! use hist_ingest::{SymphonyPaths, load_code_table, open_hist_file};
//! use hist_model::CodeDomain;
//!
//! let paths = SymphonyPaths::new("/software/EDPL/Unicorn");
//! let commands = load_code_table(&paths.command_codes(), CodeDomain::Command)?;
//! for line in open_hist_file(&paths.hist_dir().join("20230118.hist"))? {
//!     println!("{}", line?);
//! }
//! ```

mod barcodes;
mod clients;
mod codes;
mod discovery;
mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Code Tables ===
pub use codes::{DATA_CODE_EXTRAS, clean_definition, load_code_table, parse_code_line};

// === Client Types ===
pub use clients::{load_client_types, parse_client_types};

// === Barcodes ===
pub use barcodes::{BarcodeLoad, load_barcode_index, parse_barcode_line};

// === File Discovery ===
pub use discovery::{DEFAULT_UNICORN_PATH, SymphonyPaths, list_hist_files};

// === Reading ===
pub use reader::{Compression, HistReader, decode_latin1, open_hist_file, read_text_lines};
