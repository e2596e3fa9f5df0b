//! Symphony code definition files.
//!
//! `cmdcode` and `datacode` hold one definition per line:
//!
//! ```text
//! 0C|item category five|
//! 0D|List of user categories|
//! 0E|User Email|
//! ```

use std::path::Path;

use hist_model::{CodeDomain, CodeTable};

use crate::error::Result;
use crate::reader::read_text_lines;

/// Data codes used in history logs that the stock `datacode` file lacks.
pub const DATA_CODE_EXTRAS: [(&str, &str); 4] = [
    ("uF", "user_first_name"),
    ("uL", "user_last_name"),
    ("uU", "user_prefered_name"),
    ("P7", "circ_rule"),
];

/// Characters removed from every definition.
const STRIPPED_CHARS: &[char] = &[
    '\\', '/', '`', '*', '_', '{', '}', '[', ']', '(', ')', '<', '>', '!', '$', ',', '\'',
];

/// Clean a definition. With `snake_case`, spaces become underscores and the
/// result is lower-cased so it can be used as a field name.
pub fn clean_definition(raw: &str, snake_case: bool) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !STRIPPED_CHARS.contains(ch))
        .collect();
    if snake_case {
        cleaned.replace(' ', "_").to_lowercase()
    } else {
        cleaned
    }
}

/// Parse one `code|definition|` line.
pub fn parse_code_line(line: &str, snake_case: bool) -> Option<(String, String)> {
    let mut parts = line.split('|');
    let code = parts.next()?.trim();
    let definition = parts.next()?;
    if code.is_empty() {
        return None;
    }
    Some((code.to_string(), clean_definition(definition, snake_case)))
}

/// Load a code file. Data code definitions are turned into snake-case field
/// names; command definitions keep their case and spaces.
///
/// Lines that do not parse, or whose code the table rejects, are skipped
/// with a warning.
pub fn load_code_table(path: &Path, domain: CodeDomain) -> Result<CodeTable> {
    let snake_case = domain == CodeDomain::Data;
    let mut table = CodeTable::new(domain);
    for (index, line) in read_text_lines(path)?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((code, definition)) = parse_code_line(line, snake_case) else {
            tracing::warn!(path = %path.display(), line = index + 1, "skipping malformed code line");
            continue;
        };
        if let Err(error) = table.insert(code, definition) {
            tracing::warn!(path = %path.display(), line = index + 1, %error, "skipping code");
        }
    }
    tracing::debug!(
        path = %path.display(),
        %domain,
        codes = table.len(),
        "loaded code table"
    );
    Ok(table)
}
