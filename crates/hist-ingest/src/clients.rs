//! Client-type table.
//!
//! A JSON object mapping the numeric client type written in history logs to
//! its Symphony policy name:
//!
//! ```json
//! { "5": "CLIENT_ONLINE_CATALOG", "6": "CLIENT_SIP2" }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use hist_model::{CodeDomain, CodeTable};

use crate::error::{IngestError, Result};

pub fn load_client_types(path: &Path) -> Result<CodeTable> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::from_io(path, e))?;
    parse_client_types(&text).map_err(|source| IngestError::ClientTable {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the JSON text of a client table. Empty keys are skipped.
pub fn parse_client_types(text: &str) -> serde_json::Result<CodeTable> {
    let entries: BTreeMap<String, String> = serde_json::from_str(text)?;
    let mut table = CodeTable::new(CodeDomain::ClientType);
    for (code, name) in entries {
        if let Err(error) = table.insert(code, name) {
            tracing::warn!(%error, "skipping client type");
        }
    }
    Ok(table)
}
