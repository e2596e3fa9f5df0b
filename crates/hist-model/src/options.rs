//! Format constants of the Symphony history log.

use serde::{Deserialize, Serialize};

/// Separators, markers and placeholder values used when reading history
/// lines.
///
/// The defaults describe production Symphony logs. Tests and non-production
/// fixtures can override any of them with the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Character between fields (`^`).
    pub field_separator: char,
    /// Leading character of every record (`E`).
    pub record_start: char,
    /// Code of the token that closes a record (`O0`).
    pub end_of_record: String,
    /// Length of the system prefix on library codes (`EPL` in `EPLMNA`).
    pub branch_prefix_len: usize,
    /// Digits of the record timestamp kept after the record-start marker
    /// (`YYYYMMDDhhmmss`).
    pub timestamp_width: usize,
    /// Offset of the command code inside the second token.
    pub command_code_offset: usize,
    /// Replacement for Symphony's `NEVER` date.
    pub never_date: String,
    /// Date emitted when a value cannot be read as a date.
    pub fallback_date: String,
    /// Value written in place of user PINs.
    pub redacted_pin: String,
    /// Command label of a discharge transaction.
    pub discharge_command: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            field_separator: '^',
            record_start: 'E',
            end_of_record: "O0".to_string(),
            branch_prefix_len: 3,
            timestamp_width: 14,
            command_code_offset: 3,
            never_date: "2040-01-01".to_string(),
            fallback_date: "1900-01-01".to_string(),
            redacted_pin: "xxxxx".to_string(),
            discharge_command: "Discharge Item".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_separator(mut self, separator: char) -> Self {
        self.field_separator = separator;
        self
    }

    pub fn with_record_start(mut self, marker: char) -> Self {
        self.record_start = marker;
        self
    }

    pub fn with_end_of_record(mut self, code: impl Into<String>) -> Self {
        self.end_of_record = code.into();
        self
    }

    pub fn with_branch_prefix_len(mut self, len: usize) -> Self {
        self.branch_prefix_len = len;
        self
    }

    pub fn with_never_date(mut self, date: impl Into<String>) -> Self {
        self.never_date = date.into();
        self
    }

    pub fn with_fallback_date(mut self, date: impl Into<String>) -> Self {
        self.fallback_date = date.into();
        self
    }

    pub fn with_redacted_pin(mut self, placeholder: impl Into<String>) -> Self {
        self.redacted_pin = placeholder.into();
        self
    }

    pub fn with_discharge_command(mut self, label: impl Into<String>) -> Self {
        self.discharge_command = label.into();
        self
    }
}
