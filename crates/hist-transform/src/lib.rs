//! Symphony history record translation.
//!
//! This crate turns one raw history line into a [`Record`](hist_model::Record):
//!
//! - **tokenizer**: splits a line into code-prefixed fields
//! - **normalization**: date normalization and value clean-up helpers
//! - **item_key**: correlates catalog key, call sequence and copy number into
//!   an item barcode
//! - **rules**: picks the transformation for a resolved field name
//! - **translator**: the per-line state machine that ties these together

pub mod item_key;
pub mod normalization;
pub mod rules;
pub mod tokenizer;
pub mod translator;

pub use normalization::datetime;

pub use item_key::ItemKeyCorrelator;
pub use normalization::datetime::{Clock, DateForm, DateNormalizer, FixedClock, SystemClock};
pub use rules::FieldRule;
pub use tokenizer::{RawField, tokenize};
pub use translator::{Translation, TranslationTables, Translator};
