//! Per-line record translation.
//!
//! A history line looks like
//!
//! ```text
//! E202301180024493003R^S59IYFWCLOUDLIBRARY^FEEPLMNA^FGEPLHVY^FFEPLCPL^O
//! ```
//!
//! Token 0 is the record timestamp, token 1 carries the command code at a
//! fixed offset, and every later token is a data code followed by its value.

use tracing::{debug, warn};

use hist_model::{
    BarcodeIndex, CodeDomain, CodeTable, FormatOptions, MissingCodeTracker, Record,
};

use crate::item_key::ItemKeyCorrelator;
use crate::normalization::datetime::{Clock, DateForm, DateNormalizer};
use crate::normalization::text::{strip_leading_chars, take_leading_chars};
use crate::rules::FieldRule;
use crate::tokenizer::{RawField, tokenize};

/// Length of the tag type prefix on `entry_or_tag_data` values.
const TAG_PREFIX_LEN: usize = 2;

/// Lookup tables used during translation.
#[derive(Debug, Clone)]
pub struct TranslationTables {
    pub commands: CodeTable,
    pub data: CodeTable,
    pub client_types: CodeTable,
    pub barcodes: BarcodeIndex,
}

impl TranslationTables {
    pub fn new(commands: CodeTable, data: CodeTable) -> Self {
        Self {
            commands,
            data,
            client_types: CodeTable::new(CodeDomain::ClientType),
            barcodes: BarcodeIndex::new(),
        }
    }

    pub fn with_client_types(mut self, client_types: CodeTable) -> Self {
        self.client_types = client_types;
        self
    }

    pub fn with_barcodes(mut self, barcodes: BarcodeIndex) -> Self {
        self.barcodes = barcodes;
        self
    }
}

/// Result of translating one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub record: Record,
    /// Fatal-to-record errors on this line (0 or 1).
    pub errors: usize,
}

impl Translation {
    pub fn is_complete(&self) -> bool {
        self.errors == 0
    }
}

/// Translates history lines into records.
///
/// The translator owns the code tables for the whole run because unknown
/// data codes are added to the data table as placeholders when first seen.
/// It also keeps the run counters and the missing-code tracker.
#[derive(Debug)]
pub struct Translator {
    tables: TranslationTables,
    options: FormatOptions,
    dates: DateNormalizer,
    missing: MissingCodeTracker,
    records: u64,
    errors: u64,
}

impl Translator {
    pub fn new(tables: TranslationTables, options: FormatOptions) -> Self {
        let dates = DateNormalizer::new(&options);
        Self {
            tables,
            options,
            dates,
            missing: MissingCodeTracker::new(),
            records: 0,
            errors: 0,
        }
    }

    /// Replace the clock used for `TODAY` dates.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.dates = DateNormalizer::with_clock(&self.options, clock);
        self
    }

    /// Translate one line. `line_no` is only used for missing-code reports.
    pub fn translate(&mut self, line_no: u64, line: &str) -> Translation {
        self.records += 1;
        let fields = tokenize(line, self.options.field_separator);
        let mut record = Record::new();

        let stamp = fields.first().map_or("", RawField::as_str);
        let stamp = self.timestamp_digits(stamp);
        record.insert("timestamp", self.dates.normalize(stamp, DateForm::Full));

        let command = fields
            .get(1)
            .and_then(|field| self.command_code(field.as_str()))
            .and_then(|code| self.tables.commands.resolve(code));
        let Some(command) = command else {
            self.errors += 1;
            warn!(
                line = line_no,
                command = fields.get(1).map_or("", RawField::as_str),
                "unknown command code, record left incomplete"
            );
            return Translation { record, errors: 1 };
        };
        let is_discharge = command == self.options.discharge_command;
        record.insert("command_code", command);

        let mut item_key = ItemKeyCorrelator::new();
        for field in fields.iter().skip(2) {
            if field.is_inert(&self.options.end_of_record) {
                continue;
            }
            let Some(code) = field.code() else {
                continue;
            };
            let value = field.value();
            let name = match self.tables.data.resolve(code) {
                Some(name) => name.to_string(),
                None => {
                    self.missing.register(line_no, code);
                    let name = self.tables.data.insert_placeholder(code);
                    debug!(line = line_no, code, field = %name, "undefined data code");
                    record.insert(name, value);
                    continue;
                }
            };
            self.apply_rule(&mut record, &mut item_key, name, value, line_no);
        }

        if is_discharge && !record.contains("date_of_discharge") {
            record.insert(
                "date_of_discharge",
                self.dates.normalize(stamp, DateForm::DateOnly),
            );
        }

        Translation { record, errors: 0 }
    }

    fn apply_rule(
        &self,
        record: &mut Record,
        item_key: &mut ItemKeyCorrelator,
        name: String,
        value: &str,
        line_no: u64,
    ) {
        match FieldRule::for_field(&name) {
            FieldRule::Date => {
                record.insert(name, self.dates.normalize(value, DateForm::Full));
            }
            FieldRule::BranchCode => {
                record.insert(
                    name,
                    strip_leading_chars(value, self.options.branch_prefix_len),
                );
            }
            FieldRule::RedactPin => {
                record.insert(name, self.options.redacted_pin.as_str());
            }
            FieldRule::CatalogKey => {
                item_key.observe_catalog_key(value);
                self.write_item_id(record, item_key);
            }
            FieldRule::CallSequence => {
                item_key.observe_call_sequence(value);
                self.write_item_id(record, item_key);
            }
            FieldRule::CopyNumber => {
                record.insert(name, value);
                item_key.observe_copy_number(value);
                self.write_item_id(record, item_key);
            }
            FieldRule::TagData => {
                record.insert(name, strip_leading_chars(value, TAG_PREFIX_LEN));
            }
            FieldRule::ClientType => match self.tables.client_types.resolve(value) {
                Some(client_type) => record.insert(name, client_type),
                None => {
                    warn!(line = line_no, client_type = value, "unknown client type");
                    record.insert(name, value);
                }
            },
            FieldRule::Verbatim => record.insert(name, value),
        }
    }

    fn write_item_id(&self, record: &mut Record, item_key: &mut ItemKeyCorrelator) {
        if let Some(barcode) = item_key.resolve(&self.tables.barcodes) {
            record.insert("item_id", barcode);
        }
    }

    /// The `YYYYMMDDhhmmss` digits of the timestamp token.
    fn timestamp_digits<'a>(&self, token: &'a str) -> &'a str {
        let token = token.strip_prefix(self.options.record_start).unwrap_or(token);
        take_leading_chars(token, self.options.timestamp_width)
    }

    fn command_code<'a>(&self, token: &'a str) -> Option<&'a str> {
        let tail = strip_leading_chars(token, self.options.command_code_offset);
        let code = take_leading_chars(tail, 2);
        (code.chars().count() == 2).then_some(code)
    }

    pub fn tables(&self) -> &TranslationTables {
        &self.tables
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Lines translated so far.
    pub fn record_count(&self) -> u64 {
        self.records
    }

    /// Records left incomplete so far.
    pub fn error_count(&self) -> u64 {
        self.errors
    }

    pub fn missing_codes(&self) -> &MissingCodeTracker {
        &self.missing
    }
}
