//! Transformation rules keyed on resolved field names.

use hist_model::is_placeholder;

/// What to do with the value of a resolved data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Normalize as a date.
    Date,
    /// Remove the system prefix from a library code.
    BranchCode,
    /// Replace with the PIN placeholder.
    RedactPin,
    /// Feed the item-key correlator; not written to the record.
    CatalogKey,
    /// Feed the item-key correlator; not written to the record.
    CallSequence,
    /// Write as-is, feed the correlator, and add `item_id` when it resolves.
    CopyNumber,
    /// Remove the 2-character tag type prefix.
    TagData,
    /// Translate through the client-type table.
    ClientType,
    /// Write as-is.
    Verbatim,
}

impl FieldRule {
    /// Pick the rule for a data-code field name.
    ///
    /// Exact names win over the substring and prefix checks.
    pub fn for_field(name: &str) -> Self {
        match name {
            "user_pin" => return Self::RedactPin,
            "catalog_key_number" => return Self::CatalogKey,
            "call_sequence_code" => return Self::CallSequence,
            "copy_number" => return Self::CopyNumber,
            "entry_or_tag_data" => return Self::TagData,
            "client_type" => return Self::ClientType,
            "user_last_activity" | "birth_year" => return Self::Date,
            _ => {}
        }
        if is_placeholder(name) {
            return Self::Verbatim;
        }
        if name.contains("date") {
            return Self::Date;
        }
        if name.contains("library")
            || name.starts_with("transit_to")
            || name.starts_with("transit_from")
        {
            return Self::BranchCode;
        }
        Self::Verbatim
    }
}
