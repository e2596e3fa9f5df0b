//! JSON output for translated history records.
//!
//! Records are written either as one JSON array per hist file or as one
//! object per line for MongoDB import.

mod error;
mod paths;
mod writer;

pub use error::{OutputError, Result};
pub use paths::{create_output_file, ensure_parent_dir, output_path_for};
pub use writer::{OutputFormat, RecordWriter};
